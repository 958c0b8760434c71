pub mod assemble;
pub mod build;
pub mod compose;
pub mod document;
pub mod io;
pub mod linker;
pub mod scan;
pub mod tools;

#[cfg(test)]
pub mod tests;

// Re-export key types for easier usage
pub use assemble::DocumentAssembler;
pub use build::{BuildError, BuildLayout, BuildReport, Builder, DocsBuild, PluginBuild, PreparedDocs};
pub use compose::ScriptComposer;
pub use document::{Document, LineRef};
pub use io::{ExcludeList, IoError};
pub use linker::{ImageLinker, LinkerError};
pub use scan::{ExampleBlock, ExampleSyntax, ExtractError, Extraction, extract_examples};
pub use tools::{Invocation, ProcessRunner, ToolError, ToolOutput, ToolRunner};
