use serde::Serialize;

/// Foreground/background pair used by the hover UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Color {
    pub text: &'static str,
    pub background: &'static str,
}

/// Fixed palettes, one per kind of tooltip content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Palette {
    Keyword,
    Builtin,
    Promise,
    WebApi,
    Grpc,
    Project,
    Contextual,
    TypeSignature,
    Error,
}

impl Palette {
    pub fn color(self) -> Color {
        let (text, background) = match self {
            Palette::Keyword => ("#c678dd", "#2c2135"),
            Palette::Builtin => ("#e5c07b", "#2f2a1e"),
            Palette::Promise => ("#56b6c2", "#1c2e31"),
            Palette::WebApi => ("#61afef", "#1b2a38"),
            Palette::Grpc => ("#98c379", "#22301c"),
            Palette::Project => ("#d19a66", "#33261a"),
            Palette::Contextual => ("#abb2bf", "#21252b"),
            Palette::TypeSignature => ("#4ec9b0", "#1e2d2a"),
            Palette::Error => ("#f44747", "#3a1d1d"),
        };
        Color { text, background }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Palette::Keyword => "keyword",
            Palette::Builtin => "builtin",
            Palette::Promise => "promise",
            Palette::WebApi => "web-api",
            Palette::Grpc => "grpc",
            Palette::Project => "project",
            Palette::Contextual => "contextual",
            Palette::TypeSignature => "type-signature",
            Palette::Error => "error",
        }
    }

    /// Parses a palette name as written in configuration files.
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "keyword" => Palette::Keyword,
            "builtin" => Palette::Builtin,
            "promise" => Palette::Promise,
            "web-api" => Palette::WebApi,
            "grpc" => Palette::Grpc,
            "project" => Palette::Project,
            "contextual" => Palette::Contextual,
            "type-signature" => Palette::TypeSignature,
            "error" => Palette::Error,
            _ => return None,
        })
    }
}
