//! # Prompt catalog
//!
//! Static mapping from prompt category to template text, plus a keyword classifier.
//!
//! ## Classification
//!
//! [`classify`] is deterministic and total: case-insensitive substring match against
//! fixed keyword sets, evaluated in priority order technical → educational → sales →
//! creative; first match wins, no match yields [`PromptCategory::Default`].
//!
//! ## Usage
//!
//! Used by chat-handlers: the command router resolves `/prompt_<nome>` via [`resolve`],
//! the response generator classifies plain messages via [`classify`] and fetches the
//! template via [`template`]. Custom free-text prompts bypass the catalog entirely.

use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Unknown prompt name: {0}")]
    UnknownPromptName(String),
}

/// Prompt category. Variant order is the classification priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptCategory {
    Technical,
    Educational,
    Sales,
    Creative,
    Default,
}

/// Default persona: the bot's base behavior when no override or keyword applies.
const PROMPT_DEFAULT: &str = "\
Você é um assistente inteligente do WhatsApp chamado Jarvis.
Características:
- Seja amigável, engraçado, descolado, sarcástico e prestativo
- Responda de forma clara e objetiva
- Use emojis quando apropriado
- Mantenha respostas concisas para WhatsApp
- Se apresente apenas quando cumprimentado pela primeira vez";

const PROMPT_TECHNICAL: &str = "\
Você é um especialista em suporte técnico.
- Forneça soluções práticas e detalhadas
- Use linguagem técnica quando necessário
- Sempre pergunte sobre o sistema operacional e versões
- Ofereça múltiplas soluções quando possível";

const PROMPT_EDUCATIONAL: &str = "\
Você é um tutor educacional.
- Explique conceitos de forma didática
- Use exemplos práticos
- Adapte a linguagem ao nível do estudante
- Faça perguntas para verificar o entendimento";

const PROMPT_SALES: &str = "\
Você é um consultor de vendas profissional.
- Seja persuasivo mas não insistente
- Identifique necessidades do cliente
- Apresente benefícios claros
- Conduza para o fechamento da venda";

const PROMPT_CREATIVE: &str = "\
Você é um assistente criativo.
- Pense fora da caixa
- Ofereça ideias inovadoras
- Use linguagem inspiradora
- Estimule a criatividade do usuário";

/// Categories in classification priority order, Default last.
pub const CATEGORIES: [PromptCategory; 5] = [
    PromptCategory::Technical,
    PromptCategory::Educational,
    PromptCategory::Sales,
    PromptCategory::Creative,
    PromptCategory::Default,
];

impl PromptCategory {
    /// Command-facing name (`/prompt_<name>`).
    pub fn name(&self) -> &'static str {
        match self {
            PromptCategory::Technical => "tecnico",
            PromptCategory::Educational => "educacional",
            PromptCategory::Sales => "vendas",
            PromptCategory::Creative => "criativo",
            PromptCategory::Default => "padrao",
        }
    }

    /// Keywords that trigger this category in [`classify`]. Default matches nothing.
    pub fn keywords(&self) -> &'static [&'static str] {
        match self {
            PromptCategory::Technical => &["técnico", "problema", "erro"],
            PromptCategory::Educational => &["aprenda", "estudo", "explicar"],
            PromptCategory::Sales => &["venda", "produto", "comprar"],
            PromptCategory::Creative => &["criativo", "ideia", "inventar"],
            PromptCategory::Default => &[],
        }
    }
}

/// Returns the immutable template text for a category.
pub fn template(category: PromptCategory) -> &'static str {
    match category {
        PromptCategory::Technical => PROMPT_TECHNICAL,
        PromptCategory::Educational => PROMPT_EDUCATIONAL,
        PromptCategory::Sales => PROMPT_SALES,
        PromptCategory::Creative => PROMPT_CREATIVE,
        PromptCategory::Default => PROMPT_DEFAULT,
    }
}

/// Looks up a template by command-facing name (tecnico, educacional, vendas, criativo,
/// padrao). Custom free-text prompts are stored verbatim and never pass through here.
pub fn resolve(name: &str) -> Result<&'static str, CatalogError> {
    CATEGORIES
        .iter()
        .find(|c| c.name() == name)
        .map(|c| template(*c))
        .ok_or_else(|| CatalogError::UnknownPromptName(name.to_string()))
}

/// Classifies message text into a prompt category by keyword.
///
/// Case-insensitive substring match; first category (in priority order) with a matching
/// keyword wins; no match yields Default.
pub fn classify(text: &str) -> PromptCategory {
    let lower = text.to_lowercase();
    for category in CATEGORIES {
        if category.keywords().iter().any(|kw| lower.contains(kw)) {
            return category;
        }
    }
    PromptCategory::Default
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_technical_keywords() {
        assert_eq!(classify("meu notebook deu erro"), PromptCategory::Technical);
        assert_eq!(
            classify("estou com um problema no meu notebook"),
            PromptCategory::Technical
        );
        assert_eq!(classify("suporte TÉCNICO urgente"), PromptCategory::Technical);
    }

    #[test]
    fn test_classify_each_category() {
        assert_eq!(classify("quero estudo dirigido"), PromptCategory::Educational);
        assert_eq!(classify("qual o melhor produto?"), PromptCategory::Sales);
        assert_eq!(classify("me dá uma ideia"), PromptCategory::Creative);
        assert_eq!(classify("bom dia!"), PromptCategory::Default);
    }

    #[test]
    fn test_classify_priority_on_cooccurrence() {
        // technical > educational > sales > creative when keywords co-occur
        assert_eq!(
            classify("tive um problema com a venda"),
            PromptCategory::Technical
        );
        assert_eq!(
            classify("quero explicar um produto"),
            PromptCategory::Educational
        );
        assert_eq!(classify("venda de ideia"), PromptCategory::Sales);
    }

    #[test]
    fn test_classify_is_case_insensitive() {
        assert_eq!(classify("PROBLEMA"), PromptCategory::Technical);
        assert_eq!(classify("Comprar"), PromptCategory::Sales);
    }

    #[test]
    fn test_resolve_known_names() {
        for category in CATEGORIES {
            assert_eq!(resolve(category.name()).unwrap(), template(category));
        }
    }

    #[test]
    fn test_resolve_unknown_name() {
        assert_eq!(
            resolve("chef"),
            Err(CatalogError::UnknownPromptName("chef".to_string()))
        );
    }
}
