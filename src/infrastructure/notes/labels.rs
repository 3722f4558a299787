// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use tracing::warn;

/// 笔记语言
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    #[default]
    En,
    Pl,
}

impl Language {
    /// 根据语言代码选择语言，大小写不敏感；不支持的代码回退到英语
    pub fn from_code(code: &str) -> Self {
        match code.trim().to_ascii_lowercase().as_str() {
            "en" => Language::En,
            "pl" => Language::Pl,
            other => {
                warn!("Unsupported language '{}', falling back to English", other);
                Language::En
            }
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Pl => "pl",
        }
    }

    /// 该语言的标签集
    pub fn labels(&self) -> &'static NoteLabels {
        match self {
            Language::En => &EN,
            Language::Pl => &PL,
        }
    }
}

/// 笔记中各段落标题和占位标题
#[derive(Debug, PartialEq, Eq)]
pub struct NoteLabels {
    pub ingredients: &'static str,
    pub cooking_time_temperature: &'static str,
    pub instructions: &'static str,
    pub hints: &'static str,
    pub url: &'static str,
    pub domain: &'static str,
    pub untitled_recipe: &'static str,
}

static EN: NoteLabels = NoteLabels {
    ingredients: "Ingredients",
    cooking_time_temperature: "Cooking time and temperature",
    instructions: "Instructions",
    hints: "Hints",
    url: "Recipe URL",
    domain: "Domain",
    untitled_recipe: "Untitled Recipe",
};

static PL: NoteLabels = NoteLabels {
    ingredients: "Składniki",
    cooking_time_temperature: "Czas gotowania i temperatura",
    instructions: "Przepis",
    hints: "Wskazówki",
    url: "URL przepisu",
    domain: "Strona",
    untitled_recipe: "Przepis bez nazwy",
};
