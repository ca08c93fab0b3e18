//! Lamina error code definitions.

macro_rules! error_codes {
    ($($(#[$meta:meta])* $name:ident = $code:expr),* $(,)?) => {
        /// A numbered code that identifies a kind of error.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum ErrorCode {
            $($(#[$meta])* $name),*
        }

        impl ErrorCode {
            /// Get the numerical value of the error code.
            pub fn to_num(&self) -> u32 {
                match self {
                    $(ErrorCode::$name => $code),*
                }
            }
        }
    };
}

error_codes! {
    // Front end errors
    ParseFailure = 1,

    // Scoping errors
    DuplicateIdentifier = 10,
    UnboundIdentifier = 11,
}
