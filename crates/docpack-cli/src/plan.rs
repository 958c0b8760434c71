use std::path::Path;

use anyhow::{Context, Result, bail};
use docpack_config::Config;
use docpack_engine::{
    BuildLayout, DocsBuild, DocumentAssembler, ExampleSyntax, ImageLinker, PluginBuild,
    ScriptComposer,
};

/// Engine settings for one build, resolved from the config file.
#[derive(Debug, Clone)]
pub struct Plan {
    pub layout: BuildLayout,
    pub plugin: Option<PluginBuild>,
    pub docs: DocsBuild,
}

impl Plan {
    /// Resolves every relative path in `config` against `root`.
    pub fn from_config(config: &Config, root: &Path) -> Result<Self> {
        let paths = &config.paths;
        let layout = BuildLayout {
            library_dir: root.join(&paths.library_dir),
            plugin_dir: root.join(&paths.plugin_dir),
            target_dir: root.join(&paths.target_dir),
            license: root.join(&paths.license),
            changelog: root.join(&paths.changelog),
            readme: paths.readme.clone(),
            exclude_file: paths.exclude_file.clone(),
        };
        layout
            .check_target()
            .context("Invalid `paths.target_dir`")?;

        let plugin = config.plugin.enabled.then(|| PluginBuild {
            target: config.plugin.target.clone(),
            artifact: config.plugin.artifact.clone(),
            output: config.plugin.output.clone(),
        });

        let docs = &config.docs;
        if docs.renderer.is_empty() {
            bail!("`docs.renderer` must name a program");
        }
        if docs.example_tag.is_empty() {
            bail!("`docs.example_tag` must not be empty");
        }
        let linker = ImageLinker::new(docs.image_template.clone())
            .context("Invalid `docs.image_template`")?;

        Ok(Self {
            layout,
            plugin,
            docs: DocsBuild {
                syntax: ExampleSyntax {
                    example_tag: docs.example_tag.clone(),
                    rendered_tag: docs.rendered_tag.clone(),
                    directive_marker: docs.directive_marker.clone(),
                    renderer_directive: docs.renderer_directive.clone(),
                },
                linker,
                composer: ScriptComposer::new(docs.preamble.clone()),
                assembler: DocumentAssembler::new(docs.heading_shift),
                renderer: docs.renderer.clone(),
            },
        })
    }
}
