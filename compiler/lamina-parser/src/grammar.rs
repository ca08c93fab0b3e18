//! Lamina `l3` grammar implementation using pest.

#[allow(clippy::upper_case_acronyms)]
mod derived {
    use pest_derive::Parser;

    /// Language parser, created via [pest].
    #[derive(Parser)]
    #[grammar = "grammar.pest"] // relative to src
    pub struct LaminaGrammar;
}

pub use derived::{LaminaGrammar, Rule};

pub type LaminaPair<'i> = pest::iterators::Pair<'i, Rule>;
pub type LaminaPairs<'i> = pest::iterators::Pairs<'i, Rule>;

impl Rule {
    /// A readable name for the rule, used when the parser reports which
    /// rules it expected.
    pub(crate) fn readable_name(&self) -> String {
        let name = match self {
            Rule::identifier => "an identifier",
            Rule::integer => "an integer",
            Rule::index => "a non-negative index",
            Rule::primitive_op => "one of `+`, `-` or `*`",
            Rule::comparison_op => "either `<` or `==`",
            Rule::parameters => "a parameter list",
            Rule::binding | Rule::bindings => "a binding list",
            Rule::kw_l3 => "`l3`",
            Rule::EOI => "end of input",
            Rule::let_term
            | Rule::letrec_term
            | Rule::reference
            | Rule::abstract_term
            | Rule::primitive
            | Rule::branch
            | Rule::allocate
            | Rule::load
            | Rule::store
            | Rule::begin
            | Rule::apply => "a term",
            rule => return format!("{rule:?}"),
        };

        name.to_string()
    }
}
