//! Rule compilation for the redaction cascade.
//!
//! Turns the ordered `RedactionRule` list from `config` into compiled regular
//! expressions, keeping the list order intact, and caches the result so
//! repeated engine construction within one process does not recompile.

pub mod compiler;
