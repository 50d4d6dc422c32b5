//! Shared types for the minicomp rewriter.
//!
//! This crate defines the component registry, the per-occurrence component
//! model, source positions, error types and the runtime binding value used
//! across the lexer and compiler.

mod binding;
mod component;
mod error;
mod span;

pub use binding::{BindError, Binding};
pub use component::{Arg, Component, ComponentDef, ComponentRegistry, RenderMethod, SLOT_PREFIX};
pub use error::{ErrorCategory, ErrorCode, ParseError, RewriteError, RewriteErrors, MAX_ERRORS};
pub use span::{Position, SourceFile};
