//! Scene files: a page, its element boxes and the connectors between them.
//!
//! ```toml
//! [page]
//! width = 400
//! height = 300
//!
//! [[element]]
//! id = "source"
//! top = 20
//! left = 40
//! width = 80
//! height = 40
//!
//! [[connector]]
//! source = "source"
//! target = "sink"
//! from = "bottom-middle"
//! to = "top-middle"
//! class = "flow"
//! stroke_color = "steelblue"
//! stroke_cap = "round"
//! ```

use log::debug;
use serde::Deserialize;

use tether::{
    ConnectOptions, Connectors,
    anchor::{Attachment, AttachmentParseError},
    config::{AppConfig, StrokeFields},
    geometry::{Bounds, Size},
    scene::{ElementId, SceneHost},
    stroke::StrokeDefinition,
};

use crate::error::CliError;

/// A parsed scene file.
#[derive(Debug, Clone, Deserialize)]
pub struct SceneFile {
    #[serde(default)]
    page: PageSpec,

    #[serde(default, rename = "element")]
    elements: Vec<ElementSpec>,

    #[serde(default, rename = "connector")]
    connectors: Vec<ConnectorSpec>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
struct PageSpec {
    width: f32,
    height: f32,
}

impl Default for PageSpec {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
struct ElementSpec {
    id: String,
    top: f32,
    left: f32,
    width: f32,
    height: f32,
}

#[derive(Debug, Clone, Deserialize)]
struct ConnectorSpec {
    source: String,
    target: String,
    from: String,
    to: String,
    #[serde(default)]
    class: Option<String>,
    #[serde(flatten)]
    stroke: StrokeFields,
}

impl ConnectorSpec {
    /// The connector's own stroke layered over `base`, or `None` if it sets
    /// no stroke field.
    fn stroke(
        &self,
        index: usize,
        base: Option<&StrokeDefinition>,
    ) -> Result<Option<StrokeDefinition>, CliError> {
        if self.stroke.is_empty() {
            return Ok(None);
        }

        self.stroke
            .apply(base.cloned().unwrap_or_default())
            .map(Some)
            .map_err(|message| CliError::Stroke { index, message })
    }
}

fn parse_attachment(index: usize, name: &str, lenient: bool) -> Result<Attachment, CliError> {
    if lenient {
        return Ok(Attachment::from_name_lenient(name));
    }

    name.parse().map_err(|err: AttachmentParseError| CliError::Attachment {
        index,
        message: err.to_string(),
    })
}

fn known_element(index: usize, name: &str, host: &SceneHost) -> Result<ElementId, CliError> {
    let id = ElementId::from(name);
    if host.element(&id).is_none() {
        return Err(CliError::UnknownElement {
            index,
            element: name.to_string(),
        });
    }
    Ok(id)
}

impl SceneFile {
    /// Parses a scene from TOML source.
    pub fn parse(source: &str) -> Result<Self, CliError> {
        toml::from_str(source).map_err(|err| CliError::SceneParse(err.to_string()))
    }

    /// Number of connectors declared in the scene
    pub fn connector_count(&self) -> usize {
        self.connectors.len()
    }

    /// Lays out the page and draws every connector.
    ///
    /// Connectors without any stroke, neither their own nor a configured
    /// default, get a plain black stroke so they show up in standalone SVG.
    pub fn build(
        &self,
        config: &AppConfig,
        lenient_attachments: bool,
    ) -> Result<Connectors<SceneHost>, CliError> {
        let mut host = SceneHost::new(Size::new(self.page.width, self.page.height))
            .with_element_outlines(config.style().show_elements());
        for element in &self.elements {
            host.add_element(
                element.id.as_str(),
                Bounds::from_rect(element.top, element.left, element.width, element.height),
            );
        }

        let mut connectors = Connectors::with_config(host, config)?;

        for (index, spec) in self.connectors.iter().enumerate() {
            let source = known_element(index, &spec.source, connectors.host())?;
            let target = known_element(index, &spec.target, connectors.host())?;

            let mut options = ConnectOptions::new(
                parse_attachment(index, &spec.from, lenient_attachments)?,
                parse_attachment(index, &spec.to, lenient_attachments)?,
            );
            if let Some(class) = &spec.class {
                options = options.with_class_name(class.as_str());
            }

            let stroke = match spec.stroke(index, connectors.default_stroke())? {
                Some(stroke) => stroke,
                None => connectors.default_stroke().cloned().unwrap_or_default(),
            };
            options = options.with_stroke(stroke);

            let id = connectors.connect(source, target, options)?;
            debug!(index, connector_id = id.get(); "Scene connector drawn");
        }

        Ok(connectors)
    }
}
