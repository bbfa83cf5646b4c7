//! Statement of Work payloads and the mock renderer
//!
//! The service does not read the referenced documents. The SOW text is a fixed
//! template with the contract type and the list of filenames spliced in, so the
//! output is a pure function of the request.

use serde::{Deserialize, Serialize};

/// Heading that opens every generated SOW
pub const SOW_HEADING: &str = "## Statement of Work (SOW)";

/// Label of the line listing the processed filenames
pub const FILES_LABEL: &str = "Archivos procesados: ";

/// Placeholder body lines, independent of the request
pub const PLACEHOLDER_LINES: [&str; 4] = [
    "Este es un contenido simulado del SOW.",
    "- Alcance: Desarrollo de backend.",
    "- Duración: 2 semanas.",
    "- Entregables: Código, Documentación, Soporte.",
];

/// Separator placed between filenames on the trailing line
pub const FILENAME_SEPARATOR: &str = ", ";

/// SOW extraction request
///
/// Both fields are required on the wire. Neither is validated: an empty
/// contract type and an empty filename list are both accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRequest {
    /// Contract type, embedded verbatim
    pub contract_type: String,
    /// Filenames in the order the caller listed them
    pub filenames: Vec<String>,
}

impl DocumentRequest {
    pub fn new(contract_type: impl Into<String>, filenames: Vec<String>) -> Self {
        Self {
            contract_type: contract_type.into(),
            filenames,
        }
    }
}

/// SOW extraction response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SowResponse {
    pub sow_text: String,
}

impl From<&DocumentRequest> for SowResponse {
    fn from(request: &DocumentRequest) -> Self {
        Self {
            sow_text: render_sow(&request.contract_type, &request.filenames),
        }
    }
}

/// Render the mock SOW text
///
/// Layout, with no trailing newline:
///
/// ```text
/// ## Statement of Work (SOW)
/// **Contract Type:** <contract_type>
///
/// <four placeholder lines>
///
/// Archivos procesados: <filenames joined by ", ">
/// ```
pub fn render_sow<S: AsRef<str>>(contract_type: &str, filenames: &[S]) -> String {
    let mut text = String::with_capacity(256);

    text.push_str(SOW_HEADING);
    text.push('\n');
    text.push_str("**Contract Type:** ");
    text.push_str(contract_type);
    text.push_str("\n\n");

    for line in PLACEHOLDER_LINES {
        text.push_str(line);
        text.push('\n');
    }
    text.push('\n');

    text.push_str(FILES_LABEL);
    for (i, name) in filenames.iter().enumerate() {
        if i > 0 {
            text.push_str(FILENAME_SEPARATOR);
        }
        text.push_str(name.as_ref());
    }

    text
}
