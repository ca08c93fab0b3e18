//! Conversion of the pest parse tree into `l3` terms.
use lamina_ir::{
    Identifier,
    l3::{Bindings, Program, Term},
    ops::{ComparisonOp, PrimitiveOp},
};
use lamina_reporting::report::LineColumn;
use lamina_utils::stack::ensure_sufficient_stack;

use crate::{
    error::{ParseError, ParseResult},
    grammar::{LaminaPair, LaminaPairs, Rule},
};

/// Take the next component of a rule. The grammar fixes the number of
/// components that each rule produces, so running out is a bug.
fn next_component<'i>(components: &mut LaminaPairs<'i>) -> LaminaPair<'i> {
    components.next().expect("grammar produced fewer components than expected")
}

/// Skip the leading keyword of a keyword form.
fn skip_keyword(components: &mut LaminaPairs<'_>) {
    let keyword = next_component(components);
    debug_assert!(matches!(
        keyword.as_rule(),
        Rule::kw_l3
            | Rule::kw_let
            | Rule::kw_letrec
            | Rule::kw_ref
            | Rule::kw_lambda
            | Rule::kw_if
            | Rule::kw_allocate
            | Rule::kw_load
            | Rule::kw_store
            | Rule::kw_begin
    ));
}

/// Create an error that points at the start of `pair`.
fn error_at(pair: &LaminaPair<'_>, message: String) -> ParseError {
    let (line, column) = pair.as_span().start_pos().line_col();
    ParseError { message, position: LineColumn { line, column } }
}

pub(crate) struct PestTermBuilder;

impl PestTermBuilder {
    pub(crate) fn transform_program(&self, pair: LaminaPair<'_>) -> ParseResult<Program> {
        match pair.as_rule() {
            Rule::program => {
                let mut components = pair.into_inner();
                skip_keyword(&mut components);

                let parameters = self.transform_parameters(next_component(&mut components));
                let body = self.transform_term(next_component(&mut components))?;

                Ok(Program { parameters, body })
            }
            k => panic!("unexpected rule within program: {k:?}"),
        }
    }

    pub(crate) fn transform_standalone_term(&self, pair: LaminaPair<'_>) -> ParseResult<Term> {
        match pair.as_rule() {
            Rule::standalone_term => self.transform_term(next_component(&mut pair.into_inner())),
            k => panic!("unexpected rule within standalone_term: {k:?}"),
        }
    }

    fn transform_name(&self, pair: LaminaPair<'_>) -> Identifier {
        match pair.as_rule() {
            Rule::identifier => Identifier::from(pair.as_str()),
            k => panic!("unexpected rule within identifier: {k:?}"),
        }
    }

    fn transform_parameters(&self, pair: LaminaPair<'_>) -> Vec<Identifier> {
        match pair.as_rule() {
            Rule::parameters => pair.into_inner().map(|p| self.transform_name(p)).collect(),
            k => panic!("unexpected rule within parameters: {k:?}"),
        }
    }

    fn transform_bindings(&self, pair: LaminaPair<'_>) -> ParseResult<Bindings> {
        match pair.as_rule() {
            Rule::bindings => pair
                .into_inner()
                .map(|binding| {
                    let mut components = binding.into_inner();
                    let name = self.transform_name(next_component(&mut components));
                    let value = self.transform_term(next_component(&mut components))?;

                    Ok((name, value))
                })
                .collect(),
            k => panic!("unexpected rule within bindings: {k:?}"),
        }
    }

    fn transform_index(&self, pair: LaminaPair<'_>) -> ParseResult<usize> {
        pair.as_str()
            .parse()
            .map_err(|_| error_at(&pair, format!("index `{}` is too large", pair.as_str())))
    }

    fn transform_terms(&self, pairs: LaminaPairs<'_>) -> ParseResult<Vec<Term>> {
        pairs.map(|pair| self.transform_term(pair)).collect()
    }

    fn transform_term(&self, pair: LaminaPair<'_>) -> ParseResult<Term> {
        ensure_sufficient_stack(|| self.transform_term_inner(pair))
    }

    fn transform_term_inner(&self, pair: LaminaPair<'_>) -> ParseResult<Term> {
        match pair.as_rule() {
            Rule::let_term | Rule::letrec_term => {
                let recursive = pair.as_rule() == Rule::letrec_term;
                let mut components = pair.into_inner();
                skip_keyword(&mut components);

                let bindings = self.transform_bindings(next_component(&mut components))?;
                let body = Box::new(self.transform_term(next_component(&mut components))?);

                Ok(if recursive { Term::LetRec { bindings, body } } else { Term::Let { bindings, body } })
            }
            Rule::reference => {
                let mut components = pair.into_inner();
                skip_keyword(&mut components);

                Ok(Term::Reference { name: self.transform_name(next_component(&mut components)) })
            }
            Rule::identifier => Ok(Term::Reference { name: self.transform_name(pair) }),
            Rule::integer => {
                let value = pair.as_str().parse().map_err(|_| {
                    error_at(&pair, format!("integer `{}` does not fit in 64 bits", pair.as_str()))
                })?;

                Ok(Term::Immediate { value })
            }
            Rule::abstract_term => {
                let mut components = pair.into_inner();
                skip_keyword(&mut components);

                let parameters = self.transform_parameters(next_component(&mut components));
                let body = self.transform_term(next_component(&mut components))?;

                Ok(Term::Abstract { parameters, body: Box::new(body) })
            }
            Rule::primitive => {
                let mut components = pair.into_inner();

                let operator = match next_component(&mut components).as_str() {
                    "+" => PrimitiveOp::Add,
                    "-" => PrimitiveOp::Sub,
                    "*" => PrimitiveOp::Mul,
                    k => panic!("unexpected primitive operator: {k}"),
                };
                let left = self.transform_term(next_component(&mut components))?;
                let right = self.transform_term(next_component(&mut components))?;

                Ok(Term::primitive(operator, left, right))
            }
            Rule::branch => {
                let mut components = pair.into_inner();
                skip_keyword(&mut components);

                let operator = match next_component(&mut components).as_str() {
                    "<" => ComparisonOp::Lt,
                    "==" => ComparisonOp::Eq,
                    k => panic!("unexpected comparison operator: {k}"),
                };
                let left = self.transform_term(next_component(&mut components))?;
                let right = self.transform_term(next_component(&mut components))?;
                let consequent = self.transform_term(next_component(&mut components))?;
                let otherwise = self.transform_term(next_component(&mut components))?;

                Ok(Term::branch(operator, left, right, consequent, otherwise))
            }
            Rule::allocate => {
                let mut components = pair.into_inner();
                skip_keyword(&mut components);

                Ok(Term::Allocate { count: self.transform_index(next_component(&mut components))? })
            }
            Rule::load => {
                let mut components = pair.into_inner();
                skip_keyword(&mut components);

                let base = self.transform_term(next_component(&mut components))?;
                let index = self.transform_index(next_component(&mut components))?;

                Ok(Term::load(base, index))
            }
            Rule::store => {
                let mut components = pair.into_inner();
                skip_keyword(&mut components);

                let base = self.transform_term(next_component(&mut components))?;
                let index = self.transform_index(next_component(&mut components))?;
                let value = self.transform_term(next_component(&mut components))?;

                Ok(Term::store(base, index, value))
            }
            Rule::begin => {
                let mut components = pair.into_inner();
                skip_keyword(&mut components);

                let mut effects = self.transform_terms(components)?;
                let value = effects.pop().expect("grammar requires `begin` to have a value");

                Ok(Term::begin(effects, value))
            }
            Rule::apply => {
                let mut components = pair.into_inner();

                let target = self.transform_term(next_component(&mut components))?;
                let arguments = self.transform_terms(components)?;

                Ok(Term::apply(target, arguments))
            }
            k => panic!("unexpected rule within term: {k:?}"),
        }
    }
}
