//! Form Schema Types
//!
//! Plain data, cheap to clone. Everything here serializes with serde so a
//! schema can be snapshotted into logs or test fixtures as JSON.

use formloom_ids::FieldId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The closed set of field kinds a form can contain.
///
/// Every consumer matches exhaustively. Adding a kind is a compile-time
/// ripple through the default factory, the settings rows and the renderers,
/// which is exactly the point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    /// Single-line free text
    Text,

    /// Email address input
    Email,

    /// Calendar date (no time component)
    Date,

    /// Time of day (no date component)
    Time,

    /// File upload
    File,

    /// Single choice from a dropdown
    Select,

    /// Multiple-choice checkbox group
    Checkbox,

    /// Single-choice radio group
    Radio,

    /// Terms-acceptance checkbox with rich-text content
    Acceptance,
}

impl FieldKind {
    /// All kinds, in palette order.
    pub const ALL: [FieldKind; 9] = [
        FieldKind::Text,
        FieldKind::Email,
        FieldKind::Date,
        FieldKind::Time,
        FieldKind::File,
        FieldKind::Select,
        FieldKind::Checkbox,
        FieldKind::Radio,
        FieldKind::Acceptance,
    ];

    /// Canonical lowercase name, as stored in schemas.
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Email => "email",
            FieldKind::Date => "date",
            FieldKind::Time => "time",
            FieldKind::File => "file",
            FieldKind::Select => "select",
            FieldKind::Checkbox => "checkbox",
            FieldKind::Radio => "radio",
            FieldKind::Acceptance => "acceptance",
        }
    }

    /// Display name shown in the palette.
    pub fn label(&self) -> &'static str {
        match self {
            FieldKind::Text => "Text Input",
            FieldKind::Email => "Email",
            FieldKind::Date => "Date",
            FieldKind::Time => "Time",
            FieldKind::File => "File Upload",
            FieldKind::Select => "Select Dropdown",
            FieldKind::Checkbox => "Checkbox",
            FieldKind::Radio => "Radio Button",
            FieldKind::Acceptance => "Acceptance",
        }
    }

    /// Kinds that carry a choice list.
    pub fn has_options(&self) -> bool {
        matches!(
            self,
            FieldKind::Select | FieldKind::Checkbox | FieldKind::Radio
        )
    }

    /// Kinds that carry a placeholder hint.
    pub fn has_placeholder(&self) -> bool {
        matches!(self, FieldKind::Text | FieldKind::Email | FieldKind::Select)
    }

    /// Kinds that carry rich-text content.
    pub fn has_content(&self) -> bool {
        matches!(self, FieldKind::Acceptance)
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Layout width of a rendered field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ColumnWidth {
    /// One third of the row
    #[serde(rename = "33%")]
    Third,

    /// Half of the row
    #[serde(rename = "50%")]
    Half,

    /// Two thirds of the row
    #[serde(rename = "66%")]
    TwoThirds,

    /// The full row
    #[default]
    #[serde(rename = "100%")]
    Full,
}

impl ColumnWidth {
    /// Percentage label, matching the serialized form.
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnWidth::Third => "33%",
            ColumnWidth::Half => "50%",
            ColumnWidth::TwoThirds => "66%",
            ColumnWidth::Full => "100%",
        }
    }

    /// Width as a percentage, for layout math.
    pub fn percent(&self) -> u16 {
        match self {
            ColumnWidth::Third => 33,
            ColumnWidth::Half => 50,
            ColumnWidth::TwoThirds => 66,
            ColumnWidth::Full => 100,
        }
    }

    /// The next width in the cycle, for a toggle control.
    pub fn cycle(&self) -> ColumnWidth {
        match self {
            ColumnWidth::Third => ColumnWidth::Half,
            ColumnWidth::Half => ColumnWidth::TwoThirds,
            ColumnWidth::TwoThirds => ColumnWidth::Full,
            ColumnWidth::Full => ColumnWidth::Third,
        }
    }
}

impl fmt::Display for ColumnWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Separator between label and value in an encoded option string.
pub const OPTION_SEPARATOR: char = '=';

/// A decoded choice: what the user sees and what the form submits.
///
/// Stored form on a field is the single encoded string `"Label=value"`.
/// Decoding is total: only the first separator splits, and a string with no
/// separator becomes both label and value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionPair {
    /// Display text shown next to the control
    pub label: String,

    /// Submission value
    pub value: String,
}

impl OptionPair {
    /// Decode an encoded option string. Never fails.
    pub fn parse(raw: &str) -> Self {
        match raw.split_once(OPTION_SEPARATOR) {
            Some((label, value)) => Self {
                label: label.to_string(),
                value: value.to_string(),
            },
            None => Self {
                label: raw.to_string(),
                value: raw.to_string(),
            },
        }
    }

    /// Re-encode into the stored `"Label=value"` form.
    pub fn encode(&self) -> String {
        format!("{}{}{}", self.label, OPTION_SEPARATOR, self.value)
    }
}

/// A single field on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDefinition {
    /// Unique, stable identifier. Never reused within a session.
    pub id: FieldId,

    /// What kind of input this field renders as.
    pub kind: FieldKind,

    /// Human-visible label shown above the input.
    pub label: String,

    /// Submission key for the entered value.
    pub name: String,

    /// Whether a filled form requires a value here.
    pub required: bool,

    /// Layout width of the rendered input.
    pub column_width: ColumnWidth,

    /// Hint text shown while the input is empty (text, email, select).
    #[serde(default)]
    pub placeholder: Option<String>,

    /// Encoded choice list, one `"Label=value"` string per option
    /// (select, checkbox, radio).
    #[serde(default)]
    pub options: Vec<String>,

    /// Raw HTML shown beside the acceptance checkbox. Sanitized at render
    /// time, never trusted as stored.
    #[serde(default)]
    pub content: Option<String>,
}

impl FieldDefinition {
    /// Factory for a freshly dropped field of the given kind.
    pub fn default_for(kind: FieldKind) -> Self {
        let id = FieldId::new();
        let name = format!("field_{}", id.short());
        let mut field = Self {
            id,
            kind,
            label: format!("New {} field", kind.as_str()),
            name,
            required: false,
            column_width: ColumnWidth::default(),
            placeholder: None,
            options: Vec::new(),
            content: None,
        };

        match kind {
            FieldKind::Text | FieldKind::Email => {
                field.placeholder = Some(format!("Enter {}", kind.as_str()));
            }
            FieldKind::Select | FieldKind::Checkbox | FieldKind::Radio => {
                field.options = vec![
                    "Option 1=option1".to_string(),
                    "Option 2=option2".to_string(),
                ];
            }
            FieldKind::Acceptance => {
                field.content = Some("<p><strong>I agree to the terms</strong></p>".to_string());
            }
            FieldKind::Date | FieldKind::Time | FieldKind::File => {}
        }

        field
    }

    /// Clone carrying a fresh id and a `_copy` suffixed name.
    pub fn duplicated(&self) -> Self {
        Self {
            id: FieldId::new(),
            name: format!("{}_copy", self.name),
            ..self.clone()
        }
    }

    /// Decoded choice list.
    pub fn option_pairs(&self) -> Vec<OptionPair> {
        self.options.iter().map(|raw| OptionPair::parse(raw)).collect()
    }
}

/// A form under construction: presentation metadata plus the ordered fields.
///
/// Field order is render order and fill order. Ids are unique across the
/// sequence as long as fields enter it through [`crate::store`] operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormSchema {
    /// Form title shown in the canvas header.
    pub name: String,

    /// Message shown after a successful preview submission.
    pub success_message: String,

    /// The fields, in order.
    pub fields: Vec<FieldDefinition>,
}

impl FormSchema {
    /// Create an empty form with the given metadata.
    pub fn new(name: impl Into<String>, success_message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            success_message: success_message.into(),
            fields: Vec::new(),
        }
    }

    /// The schema a fresh session starts from.
    pub fn initial() -> Self {
        Self::new("Untitled Form", "Form Submitted Successfully!")
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// True when the canvas is empty.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Look up a field by id.
    pub fn field(&self, id: &FieldId) -> Option<&FieldDefinition> {
        self.fields.iter().find(|f| &f.id == id)
    }

    /// Position of a field by id.
    pub fn position(&self, id: &FieldId) -> Option<usize> {
        self.fields.iter().position(|f| &f.id == id)
    }
}
