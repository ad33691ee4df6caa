use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::{
    document::element::Element,
    foundation::error::{FlameError, FlameResult},
    model::flame::{FLAME_TAG, Flame},
};

/// Root tag of a multi-flame document.
pub const FLAMES_TAG: &str = "flames";

/// Ordered list of flames loaded from or written to one document.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FlameCollection {
    flames: Vec<Flame>,
}

impl FlameCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_flames(flames: Vec<Flame>) -> Self {
        Self { flames }
    }

    /// Start a collection from exactly one source: an element or a file.
    pub fn builder<'a>() -> CollectionBuilder<'a> {
        CollectionBuilder::default()
    }

    pub fn flames(&self) -> &[Flame] {
        &self.flames
    }

    pub fn flames_mut(&mut self) -> &mut Vec<Flame> {
        &mut self.flames
    }

    pub fn push(&mut self, flame: Flame) {
        self.flames.push(flame);
    }

    pub fn len(&self) -> usize {
        self.flames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flames.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Flame> {
        self.flames.iter()
    }

    pub fn into_flames(self) -> Vec<Flame> {
        self.flames
    }

    /// Read a `flames` root (every `flame` child) or a lone `flame` root.
    #[tracing::instrument(skip(el), fields(root = %el.tag))]
    pub fn from_element(el: &Element) -> FlameResult<Self> {
        let flames = match el.tag.as_str() {
            FLAMES_TAG => el
                .children_named(FLAME_TAG)
                .map(Flame::from_element)
                .collect::<FlameResult<Vec<_>>>()?,
            FLAME_TAG => vec![Flame::from_element(el)?],
            other => {
                return Err(FlameError::format(format!(
                    "expected a <{FLAMES_TAG}> or <{FLAME_TAG}> root, found <{other}>"
                )));
            }
        };
        tracing::debug!(count = flames.len(), "parsed flames");
        Ok(Self { flames })
    }

    /// Parse document text.
    pub fn parse(text: &str) -> FlameResult<Self> {
        Self::from_element(&Element::parse_str(text)?)
    }

    /// Always rooted at `flames`, even for a single flame.
    pub fn to_element(&self) -> Element {
        let mut root = Element::new(FLAMES_TAG);
        root.children
            .extend(self.flames.iter().map(Flame::to_element));
        root
    }

    /// Document text for the whole collection.
    pub fn serialize(&self) -> FlameResult<String> {
        self.to_element().to_xml_string()
    }

    #[tracing::instrument(skip_all)]
    pub fn load(path: impl AsRef<Path>) -> FlameResult<Self> {
        let path = path.as_ref();
        tracing::debug!(path = %path.display(), "loading flame document");
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read flame document {}", path.display()))?;
        Self::parse(&text)
    }

    #[tracing::instrument(skip_all)]
    pub fn save(&self, path: impl AsRef<Path>) -> FlameResult<()> {
        let path = path.as_ref();
        let text = self.serialize()?;
        std::fs::write(path, text)
            .with_context(|| format!("failed to write flame document {}", path.display()))?;
        tracing::debug!(path = %path.display(), count = self.flames.len(), "saved flames");
        Ok(())
    }
}

impl<'a> IntoIterator for &'a FlameCollection {
    type Item = &'a Flame;
    type IntoIter = std::slice::Iter<'a, Flame>;

    fn into_iter(self) -> Self::IntoIter {
        self.flames.iter()
    }
}

/// Collects the source of a [`FlameCollection`].
#[derive(Debug, Default)]
pub struct CollectionBuilder<'a> {
    element: Option<&'a Element>,
    file: Option<PathBuf>,
}

impl<'a> CollectionBuilder<'a> {
    pub fn element(mut self, el: &'a Element) -> Self {
        self.element = Some(el);
        self
    }

    pub fn file(mut self, path: impl Into<PathBuf>) -> Self {
        self.file = Some(path.into());
        self
    }

    pub fn build(self) -> FlameResult<FlameCollection> {
        match (self.element, self.file) {
            (Some(el), None) => FlameCollection::from_element(el),
            (None, Some(path)) => FlameCollection::load(path),
            (Some(_), Some(_)) => Err(FlameError::construction(
                "give either an element or a file, not both",
            )),
            (None, None) => Err(FlameError::construction(
                "an element or a file is required",
            )),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/model/collection.rs"]
mod tests;
