//! 3D structure view of a Protein Data Bank entry.
//!
//! Only the identifier and viewer settings are handled here; rendering is
//! left to 3Dmol.js in a browser.

use serde::Serialize;

use crate::config::ViewerConfig;
use crate::errors::{AnalysisError, AnalysisResult};
use crate::types::StructureId;

const RCSB_ENTRY_URL: &str = "https://www.rcsb.org/structure";
const RCSB_DOWNLOAD_URL: &str = "https://files.rcsb.org/download";
const THREEDMOL_JS: &str = "https://3Dmol.org/build/3Dmol-min.js";

/// Quoted JavaScript string literal for `value`, safe inside a `<script>` block
fn js_string(value: &str) -> String {
    serde_json::Value::from(value).to_string().replace('<', "\\u003c").replace('>', "\\u003e")
}

/// What to show for one structure, and how
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StructureView {
    pub id: StructureId,
    pub style: String,
    pub color_scheme: String,
    pub background: String,
    pub width: u32,
    pub height: u32,
}

impl StructureView {
    pub fn new(id: &str, viewer: &ViewerConfig) -> AnalysisResult<Self> {
        let id = StructureId::new(id).map_err(|_| AnalysisError::InvalidStructureId(id.to_string()))?;
        Ok(Self {
            id,
            style: viewer.style.clone(),
            color_scheme: viewer.color_scheme.clone(),
            background: viewer.background.clone(),
            width: viewer.width,
            height: viewer.height,
        })
    }

    /// 3Dmol.js query string, e.g. `pdb:4HHB`
    pub fn query(&self) -> String {
        format!("pdb:{}", self.id)
    }

    pub fn entry_url(&self) -> String {
        format!("{}/{}", RCSB_ENTRY_URL, self.id)
    }

    /// Coordinates in mmCIF, which every entry provides
    pub fn download_url(&self) -> String {
        format!("{}/{}.cif", RCSB_DOWNLOAD_URL, self.id)
    }

    /// Standalone HTML page rendering the structure with 3Dmol.js
    pub fn to_html(&self) -> String {
        format!(
            r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>{id}</title>
<script src="{js}"></script>
</head>
<body>
<div id="viewer" style="width: {width}px; height: {height}px; position: relative;"></div>
<script>
  const viewer = $3Dmol.createViewer("viewer", {{ backgroundColor: {background} }});
  $3Dmol.download({query}, viewer, {{}}, function () {{
    viewer.setStyle({{}}, {{ {style}: {{ color: {color} }} }});
    viewer.zoomTo();
    viewer.render();
  }});
</script>
</body>
</html>
"#,
            id = self.id,
            js = THREEDMOL_JS,
            width = self.width,
            height = self.height,
            background = js_string(&self.background),
            query = js_string(&self.query()),
            style = js_string(&self.style),
            color = js_string(&self.color_scheme),
        )
    }
}
