//! Ordered pattern tables for the extractor. Table order is match priority.

use std::sync::LazyLock;

use regex::Regex;

/// One row of the entity table.
pub struct EntityPattern {
    pub regex: Regex,
    pub entity_type: &'static str,
    pub name: &'static str,
    pub icon: &'static str,
}

/// Built-in patterns are literals; one that fails to compile is left out of
/// its table rather than aborting extraction.
pub(crate) fn compile(source: &str) -> Option<Regex> {
    match Regex::new(source) {
        Ok(regex) => Some(regex),
        Err(e) => {
            tracing::error!(pattern = source, error = %e, "built-in pattern does not compile");
            None
        }
    }
}

fn table(sources: &[&str]) -> Vec<Regex> {
    sources.iter().filter_map(|s| compile(s)).collect()
}

pub static ENTITIES: LazyLock<Vec<EntityPattern>> = LazyLock::new(|| {
    const ROWS: [(&str, &str, &str, &str); 7] = [
        (r"(?i)customer\s+data", "customer", "Customer Data", "👥"),
        (r"(?i)sales\s+data", "sales", "Sales Data", "💰"),
        (r"(?i)inventory", "inventory", "Inventory", "📦"),
        (r"(?i)orders", "order", "Orders", "📋"),
        (r"(?i)payment", "payment", "Payment", "💳"),
        (r"(?i)support\s+ticket", "support", "Support Ticket", "🎫"),
        (r"(?i)system", "system", "System", "⚙️"),
    ];
    ROWS.iter()
        .filter_map(|&(source, entity_type, name, icon)| {
            compile(source).map(|regex| EntityPattern {
                regex,
                entity_type,
                name,
                icon,
            })
        })
        .collect()
});

/// Clause boundaries: `when/if X and|or Y then|,` before the single-clause forms.
pub static CLAUSES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    table(&[
        r"(?i)\bwhen\s+(.+?)\s+(?:and|or)\s+(.+?)(?:\s+then|\s*,)",
        r"(?i)\bif\s+(.+?)\s+(?:and|or)\s+(.+?)(?:\s+then|\s*,)",
        r"(?i)\bwhen\s+(.+?)\s+then",
        r"(?i)\bif\s+(.+?)\s+then",
    ])
});

pub static CONJUNCTION: LazyLock<Option<Regex>> =
    LazyLock::new(|| compile(r"(?i)\s+(?:and|or)\s+"));

pub static THEN_WORD: LazyLock<Option<Regex>> = LazyLock::new(|| compile(r"(?i)\bthen\b"));

pub static FIELDS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    table(&[
        r"(?i)customer\s+data",
        r"(?i)sales\s+data",
        r"(?i)inventory",
        r"(?i)orders",
        r"(?i)revenue",
        r"(?i)error\s+rate",
        r"(?i)payment",
    ])
});

pub static VALUES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    table(&[
        r"\d+%",
        r"(?i)\d+\s+minutes",
        r"(?i)\d+\s+hours",
        r"\d+",
        r"(?i)same\s+date",
        r"(?i)low",
        r"(?i)high",
    ])
});

/// Action verbs in priority order; group 1 is the verb, group 2 the object
/// (rest of the clause).
pub static ACTIONS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    ["trigger", "create", "send", "escalate", "notify"]
        .iter()
        .filter_map(|verb| compile(&format!(r"(?i)\b({})\s+([^,.;]+)", verb)))
        .collect()
});

pub static WHITESPACE: LazyLock<Option<Regex>> = LazyLock::new(|| compile(r"\s+"));
