use relative_path::{RelativePath, RelativePathBuf};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LinkerError {
    #[error("Invalid image template {template:?}: the file name must contain `{{n}}` exactly once")]
    Placeholder { template: String },
}

/// Naming policy for rendered example images.
///
/// The same template is written into the README for each example and handed
/// to the renderer as its output pattern, so the Nth reference always names the
/// Nth rendered page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageLinker {
    template: String,
}

impl ImageLinker {
    pub const PLACEHOLDER: &'static str = "{n}";
    pub const DEFAULT_TEMPLATE: &'static str = "examples/example-{n}.svg";

    pub fn new(template: impl Into<String>) -> Result<Self, LinkerError> {
        let template = template.into();
        let file_name = RelativePath::new(&template).file_name().unwrap_or_default();

        if template.matches(Self::PLACEHOLDER).count() != 1
            || !file_name.contains(Self::PLACEHOLDER)
        {
            return Err(LinkerError::Placeholder { template });
        }

        Ok(Self { template })
    }

    /// Image path of the example with the given 1-based index.
    pub fn path(&self, index: usize) -> RelativePathBuf {
        RelativePathBuf::from(self.template.replace(Self::PLACEHOLDER, &index.to_string()))
    }

    /// The template itself, placeholder included, for the renderer's output argument.
    pub fn pattern(&self) -> &str {
        &self.template
    }

    /// Directory the images land in, if the template has one.
    pub fn directory(&self) -> Option<&RelativePath> {
        RelativePath::new(&self.template)
            .parent()
            .filter(|dir| !dir.as_str().is_empty())
    }

    /// Markdown image reference for the example with the given index.
    pub fn reference(&self, index: usize) -> String {
        format!("![image]({})", self.path(index))
    }
}

impl Default for ImageLinker {
    fn default() -> Self {
        Self {
            template: Self::DEFAULT_TEMPLATE.to_string(),
        }
    }
}
