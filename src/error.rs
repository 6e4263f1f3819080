// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! This module defines the `Error` struct and the `ErrorKind` enum, which are
//! used to represent errors that can occur while building an energy system,
//! and the `Warning` struct used for components that were skipped.

/// A macro for defining the `ErrorKind` enum, the `Display` implementation for
/// it, and the constructors for the `Error` struct.
macro_rules! ErrorKind {
    ($(
        ($kind:ident, $ctor:ident)
    ),*) => {
        /// The kind of error that occurred.
        #[derive(Clone, Copy, Debug, PartialEq)]
        pub enum ErrorKind {
            $(
                $kind,
            )*
        }

        impl std::fmt::Display for ErrorKind {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                match self {
                    $(
                        Self::$kind => write!(f, "{}", stringify!($kind)),
                    )*
                }
            }
        }

        /// Constructors for [`Error`].
        impl Error {
            $(
                #[doc = concat!(
                    "Creates a new [`Error`] with the `",
                    stringify!($kind),
                    "` kind and the given description."
                )]
                pub fn $ctor(desc: impl Into<String>) -> crate::Error {
                    Self {
                        kind: ErrorKind::$kind,
                        desc: desc.into(),
                    }
                }
            )*
        }
    };
}

ErrorKind!(
    (ComponentNotFound, component_not_found),
    (Configuration, configuration),
    (Internal, internal),
    (InvalidGraph, invalid_graph),
    (InvalidTable, invalid_table)
);

/// An error that can occur while reading scenario tables, building the
/// components of an energy system, or assembling them into an
/// [EnergySystemGraph][crate::EnergySystemGraph].
#[derive(Clone, Debug, PartialEq)]
pub struct Error {
    kind: ErrorKind,
    desc: String,
}

impl Error {
    /// Creates a `Configuration` error that names the row label and the
    /// offending field.
    pub(crate) fn field(label: &str, field: &str, desc: impl std::fmt::Display) -> Self {
        Self::configuration(format!("{label}: field `{field}`: {desc}"))
    }

    /// Returns the kind of the error.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the description of the error.
    pub fn description(&self) -> &str {
        &self.desc
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.kind, self.desc)
    }
}

impl std::error::Error for Error {}

/// A component that was recognized but not built.
///
/// Warnings don't abort a build; they are collected and returned alongside
/// the assembled graph.
#[derive(Clone, Debug, PartialEq)]
pub struct Warning {
    /// Label of the skipped row.
    pub label: String,
    /// The category value that is not supported.
    pub category: String,
    /// Why the component was skipped.
    pub reason: String,
}

impl Warning {
    pub(crate) fn unsupported_category(
        label: impl Into<String>,
        category: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        let warning = Self {
            label: label.into(),
            category: category.into(),
            reason: reason.into(),
        };
        tracing::warn!("{}", warning);
        warning
    }
}

impl std::fmt::Display for Warning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "UnsupportedCategory: '{}' was not created, `{}` {}",
            self.label, self.category, self.reason
        )
    }
}
