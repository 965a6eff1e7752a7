//! Message classifier for free-text expense descriptions
//!
//! Turns chat messages such as "Gastei R$ 25 com lanche" into expense drafts:
//! 1. amount extraction (ordered regex table, first successful pattern wins)
//! 2. category identification (ordered keyword table, first keyword wins)
//! 3. impulsive-spend detection (overrides the category to `non_essential`)
//! 4. a motivational reply for the recorded expense
//!
//! The classifier holds only immutable tables built once in [`MessageClassifier::new`],
//! so a single instance can be shared across threads and requests.

use regex::Regex;
use tracing::{debug, warn};

use crate::error::Result;
use crate::models::{format_brl, Category, ChatOutcome, ExpenseDraft};

/// Food expenses above this amount get the "cook at home" reply
pub const FOOD_HIGH_THRESHOLD: f64 = 30.0;

/// Game expenses above this amount get the "balance fun and savings" reply
pub const GAMES_HIGH_THRESHOLD: f64 = 50.0;

/// Reply sent when a message carries no recognizable amount
pub const NO_AMOUNT_REPLY: &str = "Não consegui identificar um valor na sua mensagem. Pode repetir com o valor? Ex: 'Gastei R$ 25 com lanche'";

/// Amount patterns in priority order. Each has exactly one capture group holding
/// the numeric literal, with `,` as the decimal separator.
const AMOUNT_PATTERNS: &[&str] = &[
    r"r\$\s*(\d+(?:,\d{2})?)",        // r$ 25 / r$ 25,00
    r"(\d+(?:,\d{2})?)\s*rea(?:is|l)", // 25 reais / 1 real
    r"(\d+(?:,\d{2})?)\s*r\$",        // 25 r$
    r"gastei\s+(\d+(?:,\d{2})?)",      // gastei 25
    r"comprei.*?(\d+(?:,\d{2})?)",     // comprei um lanche por 25
];

/// Category keyword table in classification order
const CATEGORY_KEYWORDS: &[(Category, &[&str])] = &[
    (
        Category::Food,
        &[
            "lanche",
            "comida",
            "restaurante",
            "pizza",
            "hamburguer",
            "almoço",
            "jantar",
            "café",
            "padaria",
            "mercado",
            "supermercado",
        ],
    ),
    (
        Category::Games,
        &[
            "jogo",
            "game",
            "steam",
            "playstation",
            "xbox",
            "nintendo",
            "mobile",
            "app",
        ],
    ),
    (
        Category::Drinks,
        &[
            "cerveja",
            "refrigerante",
            "suco",
            "água",
            "bebida",
            "bar",
            "drink",
            "whisky",
            "vodka",
        ],
    ),
    (
        Category::Entertainment,
        &[
            "cinema",
            "filme",
            "show",
            "teatro",
            "netflix",
            "spotify",
            "youtube",
            "streaming",
        ],
    ),
    (
        Category::Other,
        &[
            "roupa",
            "sapato",
            "remedio",
            "farmacia",
            "transporte",
            "uber",
            "gasolina",
            "conta",
        ],
    ),
    (
        Category::NonEssential,
        &["impulso", "desnecessario", "besteira", "bobagem", "capricho"],
    ),
];

/// Words and phrases that flag a purchase as impulsive
const IMPULSE_INDICATORS: &[&str] = &[
    "impulso",
    "vontade",
    "desejo",
    "capricho",
    "besteira",
    "desnecessario",
    "bobagem",
    "sem precisar",
    "por impulso",
];

/// Keywords that map a message to one category
#[derive(Debug, Clone)]
pub struct CategoryRule {
    pub category: Category,
    pub keywords: Vec<String>,
}

/// Keyword/regex driven classifier for expense chat messages
#[derive(Debug, Clone)]
pub struct MessageClassifier {
    amount_patterns: Vec<Regex>,
    category_rules: Vec<CategoryRule>,
    impulse_indicators: Vec<String>,
}

impl MessageClassifier {
    /// Build the classifier from the built-in tables
    ///
    /// Fails only if a built-in pattern does not compile.
    pub fn new() -> Result<Self> {
        let amount_patterns = AMOUNT_PATTERNS
            .iter()
            .map(|p| Regex::new(p))
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let category_rules = CATEGORY_KEYWORDS
            .iter()
            .map(|(category, keywords)| CategoryRule {
                category: *category,
                keywords: keywords.iter().map(|k| k.to_lowercase()).collect(),
            })
            .collect();

        let impulse_indicators = IMPULSE_INDICATORS
            .iter()
            .map(|w| w.to_lowercase())
            .collect();

        Ok(Self {
            amount_patterns,
            category_rules,
            impulse_indicators,
        })
    }

    /// Category rules in the order they are tried
    pub fn category_rules(&self) -> &[CategoryRule] {
        &self.category_rules
    }

    /// Extract the first monetary amount from a message
    ///
    /// Patterns are tried in priority order; within a pattern only the first
    /// match counts. A captured literal that does not parse as a number sends
    /// extraction on to the next pattern. `None` means the message has no amount.
    pub fn extract_amount(&self, text: &str) -> Option<f64> {
        let text = text.to_lowercase();

        for pattern in &self.amount_patterns {
            let literal = match pattern.captures(&text).and_then(|c| c.get(1)) {
                Some(m) => m.as_str(),
                None => continue,
            };

            match literal.replace(',', ".").parse::<f64>() {
                Ok(amount) => {
                    debug!(pattern = pattern.as_str(), amount, "Amount extracted");
                    return Some(amount);
                }
                Err(e) => {
                    warn!(
                        pattern = pattern.as_str(),
                        literal,
                        error = %e,
                        "Skipping unparseable amount"
                    );
                }
            }
        }

        None
    }

    /// Identify the spending category of a message
    ///
    /// Categories are checked in declaration order and the first keyword found
    /// anywhere in the text decides. Unmatched text is `Other`.
    pub fn identify_category(&self, text: &str) -> Category {
        let text = text.to_lowercase();

        for rule in &self.category_rules {
            if let Some(keyword) = rule.keywords.iter().find(|k| text.contains(k.as_str())) {
                debug!(category = %rule.category, keyword = keyword.as_str(), "Category matched");
                return rule.category;
            }
        }

        Category::Other
    }

    /// Whether the message describes an impulsive/unneeded purchase
    pub fn detect_impulsive(&self, text: &str) -> bool {
        let text = text.to_lowercase();
        self.impulse_indicators
            .iter()
            .any(|word| text.contains(word.as_str()))
    }

    /// Classify one chat message
    ///
    /// Never fails: a message without an amount yields `detected == false`
    /// together with a prompt asking for the value.
    pub fn process_message(&self, message: &str) -> ChatOutcome {
        let amount = match self.extract_amount(message) {
            Some(amount) => amount,
            None => {
                debug!("No amount found in message");
                return ChatOutcome {
                    detected: false,
                    reply: NO_AMOUNT_REPLY.to_string(),
                    expense: None,
                };
            }
        };

        let mut category = self.identify_category(message);
        let is_impulsive = self.detect_impulsive(message);
        if is_impulsive {
            category = Category::NonEssential;
        }

        let draft = ExpenseDraft {
            amount,
            category,
            description: message.trim().to_string(),
            is_impulsive,
        };
        let reply = motivational_reply(&draft);

        ChatOutcome {
            detected: true,
            reply,
            expense: Some(draft),
        }
    }
}

/// Reply for a recorded expense; the first matching rule wins
pub fn motivational_reply(expense: &ExpenseDraft) -> String {
    let value = format_brl(expense.amount);

    if expense.is_impulsive || expense.category == Category::NonEssential {
        return format!(
            "💸 Gasto de {} registrado como não essencial. Que tal pensar duas vezes na próxima? Pequenas economias fazem grande diferença! 💪",
            value
        );
    }

    match expense.category {
        Category::Food if expense.amount > FOOD_HIGH_THRESHOLD => format!(
            "🍽️ {} em alimentação registrado! Valor um pouco alto - que tal cozinhar mais em casa para economizar? 👨‍🍳",
            value
        ),
        Category::Food => format!(
            "🍽️ {} em alimentação registrado! Gasto controlado, parabéns! 👏",
            value
        ),
        Category::Entertainment => format!(
            "🎬 {} em entretenimento registrado! É importante se divertir, mas sempre com moderação! 😊",
            value
        ),
        Category::Games if expense.amount > GAMES_HIGH_THRESHOLD => format!(
            "🎮 {} em jogos registrado! Valor alto - lembre-se de equilibrar diversão e economia! ⚖️",
            value
        ),
        Category::Games => format!("🎮 {} em jogos registrado! Diversão controlada! 🎯", value),
        category => format!(
            "💰 Gasto de {} registrado na categoria {}. Continue acompanhando seus gastos! 📊",
            value,
            category.label()
        ),
    }
}
