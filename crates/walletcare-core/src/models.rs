//! Domain models for WalletCare

use serde::{Deserialize, Serialize};

/// Render an amount the way every reply, insight and report shows it
pub fn format_brl(amount: f64) -> String {
    format!("R$ {:.2}", amount)
}

/// Spending category assigned to every expense
///
/// Variant order is the classification order: when a message contains
/// keywords from several categories, the earlier category wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    #[serde(alias = "alimentacao")]
    Food,
    #[serde(alias = "jogos")]
    Games,
    #[serde(alias = "bebidas")]
    Drinks,
    #[serde(alias = "entretenimento")]
    Entertainment,
    #[default]
    #[serde(alias = "outros")]
    Other,
    #[serde(alias = "nao_essencial")]
    NonEssential,
}

impl Category {
    /// All categories in classification order
    pub const ALL: [Category; 6] = [
        Category::Food,
        Category::Games,
        Category::Drinks,
        Category::Entertainment,
        Category::Other,
        Category::NonEssential,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Food => "food",
            Self::Games => "games",
            Self::Drinks => "drinks",
            Self::Entertainment => "entertainment",
            Self::Other => "other",
            Self::NonEssential => "non_essential",
        }
    }

    /// Name shown to the user inside replies and insights
    pub fn label(&self) -> &'static str {
        match self {
            Self::Food => "alimentacao",
            Self::Games => "jogos",
            Self::Drinks => "bebidas",
            Self::Entertainment => "entretenimento",
            Self::Other => "outros",
            Self::NonEssential => "nao_essencial",
        }
    }

    /// Title-cased label for report tables ("Nao Essencial")
    pub fn title(&self) -> String {
        self.label()
            .split('_')
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "food" | "alimentacao" => Ok(Self::Food),
            "games" | "jogos" => Ok(Self::Games),
            "drinks" | "bebidas" => Ok(Self::Drinks),
            "entertainment" | "entretenimento" => Ok(Self::Entertainment),
            "other" | "outros" => Ok(Self::Other),
            "non_essential" | "non-essential" | "nao_essencial" => Ok(Self::NonEssential),
            _ => Err(format!("Unknown category: {}", s)),
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Classifier output before persistence metadata (id, timestamp) is attached
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseDraft {
    pub amount: f64,
    pub category: Category,
    pub description: String,
    pub is_impulsive: bool,
}

impl ExpenseDraft {
    /// Attach the storage-assigned id and timestamp
    pub fn into_expense(self, id: i64, timestamp: String) -> Expense {
        Expense {
            id,
            amount: self.amount,
            category: self.category,
            description: self.description,
            is_impulsive: self.is_impulsive,
            timestamp,
        }
    }
}

/// A persisted expense record
///
/// Older data files used Portuguese field names; they are accepted on read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    #[serde(default)]
    pub id: i64,
    #[serde(default, alias = "valor")]
    pub amount: f64,
    #[serde(default, alias = "categoria")]
    pub category: Category,
    #[serde(default, alias = "descricao")]
    pub description: String,
    #[serde(default, alias = "eh_impulsivo")]
    pub is_impulsive: bool,
    /// ISO-8601 timestamp assigned by the store
    #[serde(default, alias = "data")]
    pub timestamp: String,
}

/// A manually entered expense (no classification involved)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewExpense {
    #[serde(alias = "valor")]
    pub amount: f64,
    #[serde(default, alias = "categoria")]
    pub category: Category,
    #[serde(default, alias = "descricao")]
    pub description: String,
    #[serde(default, alias = "eh_impulsivo")]
    pub is_impulsive: bool,
    /// Keeps the caller's timestamp instead of "now" when set
    #[serde(default, alias = "data")]
    pub timestamp: Option<String>,
}

/// Result of processing one chat message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatOutcome {
    pub detected: bool,
    pub reply: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expense: Option<ExpenseDraft>,
}

/// Summary insights derived from spending history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightReport {
    pub insights: Vec<String>,
}

/// Per-device settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceConfig {
    #[serde(default, alias = "renda_mensal")]
    pub monthly_income: f64,
    #[serde(default = "default_first_access", alias = "primeiro_acesso")]
    pub first_access: bool,
    #[serde(default = "default_theme", alias = "tema")]
    pub theme: String,
    #[serde(default, alias = "meta_mensal")]
    pub monthly_goal: f64,
}

fn default_first_access() -> bool {
    true
}

fn default_theme() -> String {
    "claro".to_string()
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            monthly_income: 0.0,
            first_access: default_first_access(),
            theme: default_theme(),
            monthly_goal: 0.0,
        }
    }
}

/// Partial configuration update; only supplied fields are overwritten
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigUpdate {
    #[serde(default, alias = "renda_mensal")]
    pub monthly_income: Option<f64>,
    #[serde(default, alias = "primeiro_acesso")]
    pub first_access: Option<bool>,
    #[serde(default, alias = "tema")]
    pub theme: Option<String>,
    #[serde(default, alias = "meta_mensal")]
    pub monthly_goal: Option<f64>,
}

impl ConfigUpdate {
    pub fn apply(self, config: &mut DeviceConfig) {
        if let Some(income) = self.monthly_income {
            config.monthly_income = income;
        }
        if let Some(first_access) = self.first_access {
            config.first_access = first_access;
        }
        if let Some(theme) = self.theme {
            config.theme = theme;
        }
        if let Some(goal) = self.monthly_goal {
            config.monthly_goal = goal;
        }
    }
}

/// On-disk expense document for one device
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ledger {
    #[serde(default, alias = "gastos")]
    pub expenses: Vec<Expense>,
    #[serde(default = "default_categories", alias = "categorias")]
    pub categories: Vec<Category>,
}

fn default_categories() -> Vec<Category> {
    Category::ALL.to_vec()
}

impl Default for Ledger {
    fn default() -> Self {
        Self {
            expenses: Vec::new(),
            categories: default_categories(),
        }
    }
}
