//! Failure categories shared by the source parser and the target contract
//!
//! Each category is one failure condition both parsers reject. The table
//! below records how the source parser reports it (reason codes and
//! message prefixes) and the wording the target contract uses for it.

use std::fmt;

use crate::raw::RawSyntaxError;

/// Failure conditions with a fixed target-shape message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureCategory {
    // =========================================================================
    // Module structure
    // =========================================================================
    /// `import`/`export` nested inside a block or function
    ImportExportNotTopLevel,
    /// `import`/`export` in a script
    ImportExportOutsideModule,

    // =========================================================================
    // Context-sensitive keywords
    // =========================================================================
    /// `super` outside a method body
    SuperOutsideMethod,
    /// `return` at the top level
    ReturnOutsideFunction,
    /// A second `constructor` in one class body
    DuplicateConstructor,

    // =========================================================================
    // Lexical errors
    // =========================================================================
    UnterminatedString,
    UnterminatedTemplate,
    UnterminatedComment,
    UnterminatedRegExp,

    // =========================================================================
    // Strict mode
    // =========================================================================
    /// `with` statement in strict code
    StrictWith,
    /// Legacy octal literal in strict code
    StrictOctal,
}

struct KnownFailure {
    category: FailureCategory,
    /// Source parser error codes (`reasonCode` or `code`)
    reason_codes: &'static [&'static str],
    /// Message prefixes for source parser versions without reason codes
    prefixes: &'static [&'static str],
    message: &'static str,
}

const KNOWN_FAILURES: &[KnownFailure] = &[
    KnownFailure {
        category: FailureCategory::ImportExportNotTopLevel,
        reason_codes: &["UnexpectedImportExport"],
        prefixes: &["'import' and 'export' may only appear at the top level"],
        message: "'import' and 'export' may only appear at the top level",
    },
    KnownFailure {
        category: FailureCategory::ImportExportOutsideModule,
        reason_codes: &["ImportOutsideModule", "BABEL_PARSER_SOURCETYPE_MODULE_REQUIRED"],
        prefixes: &["'import' and 'export' may appear only with 'sourceType"],
        message: "'import' and 'export' may appear only with 'sourceType: module'",
    },
    KnownFailure {
        category: FailureCategory::SuperOutsideMethod,
        reason_codes: &["SuperNotAllowed", "UnexpectedSuper"],
        prefixes: &[
            "super is only allowed in object methods and classes",
            "'super' is only allowed in object methods and classes",
            "`super()` is only valid inside a class constructor",
            "'super' can only be used with function calls",
        ],
        message: "'super' keyword outside a method",
    },
    KnownFailure {
        category: FailureCategory::ReturnOutsideFunction,
        reason_codes: &["IllegalReturn"],
        prefixes: &["'return' outside of function"],
        message: "'return' outside of function",
    },
    KnownFailure {
        category: FailureCategory::DuplicateConstructor,
        reason_codes: &["DuplicateConstructor"],
        prefixes: &["Duplicate constructor in the same class"],
        message: "Duplicate constructor in the same class",
    },
    KnownFailure {
        category: FailureCategory::UnterminatedString,
        reason_codes: &["UnterminatedString"],
        prefixes: &["Unterminated string constant"],
        message: "Unterminated string constant",
    },
    KnownFailure {
        category: FailureCategory::UnterminatedTemplate,
        reason_codes: &["UnterminatedTemplate"],
        prefixes: &["Unterminated template"],
        message: "Unterminated template",
    },
    KnownFailure {
        category: FailureCategory::UnterminatedComment,
        reason_codes: &["UnterminatedComment"],
        prefixes: &["Unterminated comment"],
        message: "Unterminated comment",
    },
    KnownFailure {
        category: FailureCategory::UnterminatedRegExp,
        reason_codes: &["UnterminatedRegExp"],
        prefixes: &["Unterminated regular expression", "Unterminated regexp"],
        message: "Unterminated regular expression",
    },
    KnownFailure {
        category: FailureCategory::StrictWith,
        reason_codes: &["StrictWith"],
        prefixes: &["'with' in strict mode"],
        message: "'with' in strict mode",
    },
    KnownFailure {
        category: FailureCategory::StrictOctal,
        reason_codes: &["StrictOctalLiteral", "StrictNumericEscape"],
        prefixes: &[
            "Legacy octal literals are not allowed in strict mode",
            "Octal literal in strict mode",
        ],
        message: "Octal literal in strict mode",
    },
];

impl FailureCategory {
    /// Classify a source parser failure.
    ///
    /// Reason codes win over message prefixes; `None` means the failure has
    /// no counterpart in the table and its message passes through.
    pub fn classify(raw: &RawSyntaxError) -> Option<Self> {
        let codes = [raw.reason_code.as_deref(), raw.code.as_deref()];
        let by_code = KNOWN_FAILURES.iter().find(|known| {
            codes
                .iter()
                .flatten()
                .any(|code| known.reason_codes.contains(code))
        });

        by_code
            .or_else(|| {
                KNOWN_FAILURES.iter().find(|known| {
                    known
                        .prefixes
                        .iter()
                        .any(|prefix| raw.message.starts_with(prefix))
                })
            })
            .map(|known| known.category)
    }

    /// The target contract's wording for this failure
    pub fn message(&self) -> &'static str {
        KNOWN_FAILURES
            .iter()
            .find(|known| known.category == *self)
            .map_or("Unexpected token", |known| known.message)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ImportExportNotTopLevel => "import-export-not-top-level",
            Self::ImportExportOutsideModule => "import-export-outside-module",
            Self::SuperOutsideMethod => "super-outside-method",
            Self::ReturnOutsideFunction => "return-outside-function",
            Self::DuplicateConstructor => "duplicate-constructor",
            Self::UnterminatedString => "unterminated-string",
            Self::UnterminatedTemplate => "unterminated-template",
            Self::UnterminatedComment => "unterminated-comment",
            Self::UnterminatedRegExp => "unterminated-regexp",
            Self::StrictWith => "strict-with",
            Self::StrictOctal => "strict-octal",
        }
    }

    /// Every category in table order
    pub fn all() -> impl Iterator<Item = FailureCategory> {
        KNOWN_FAILURES.iter().map(|known| known.category)
    }
}

impl fmt::Display for FailureCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
