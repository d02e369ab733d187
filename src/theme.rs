use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    pub font_family: String,
    pub font_size: f32,
    pub background: String,
    pub diagnostic_color: String,
    pub commit_stroke_width: f32,
}

impl Theme {
    pub fn classic() -> Self {
        Self {
            font_family: "Arial, Helvetica, sans-serif".to_string(),
            font_size: 12.0,
            background: "#FFFFFF".to_string(),
            diagnostic_color: "#A93226".to_string(),
            commit_stroke_width: 1.0,
        }
    }

    pub fn midnight() -> Self {
        Self {
            font_family: "Inter, Segoe UI, system-ui, -apple-system, sans-serif".to_string(),
            font_size: 12.0,
            background: "#1C2430".to_string(),
            diagnostic_color: "#FA8072".to_string(),
            commit_stroke_width: 1.5,
        }
    }

    pub fn by_name(name: &str) -> Option<Self> {
        match name {
            "classic" | "default" => Some(Self::classic()),
            "midnight" | "dark" => Some(Self::midnight()),
            _ => None,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::classic()
    }
}
