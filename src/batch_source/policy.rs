//! Decisions about keys the ledger has already seen
//!
//! Pure functions; asking the operator happens in the binary.

use std::fmt;
use std::str::FromStr;

use crate::dedup::LedgerPartition;
use crate::ledger::IngestionKey;

/// What to do with already-ingested keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DuplicatePolicy {
    /// Ingest them again; the ledger gains another row per key
    Proceed,
    /// Drop them and run the rest
    Skip,
    /// Run nothing
    Abort,
}

impl fmt::Display for DuplicatePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Proceed => write!(f, "proceed"),
            Self::Skip => write!(f, "skip"),
            Self::Abort => write!(f, "abort"),
        }
    }
}

impl FromStr for DuplicatePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "proceed" | "continue" | "c" => Ok(Self::Proceed),
            "skip" | "s" => Ok(Self::Skip),
            "abort" | "a" => Ok(Self::Abort),
            other => Err(format!(
                "unknown duplicate policy '{other}' (expected proceed, skip or abort)"
            )),
        }
    }
}

/// A single manual key: re-ingesting needs explicit confirmation.
///
/// Never returns `Skip`; with one key, skipping is aborting.
#[must_use]
pub fn decide_manual(already_ingested: bool, confirmed: bool) -> DuplicatePolicy {
    if !already_ingested || confirmed {
        DuplicatePolicy::Proceed
    } else {
        DuplicatePolicy::Abort
    }
}

/// Shortcut that repeats the most recent ledger key at the manual prompt
pub const REPEAT_LAST_SHORTCUT: &str = "p";

/// What the operator's answer at the manual prompt refers to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManualAnswer {
    /// The repeat shortcut, resolved to the most recent key
    Repeat(IngestionKey),
    /// The repeat shortcut with nothing recorded yet
    NoRecent,
    /// A URL typed in full
    Target(String),
}

/// Resolve the manual prompt answer against the recent ledger keys.
///
/// `recent` is in insertion order, so the last element is the newest.
#[must_use]
pub fn resolve_manual_answer(answer: &str, recent: &[IngestionKey]) -> ManualAnswer {
    let answer = answer.trim();
    if !answer.eq_ignore_ascii_case(REPEAT_LAST_SHORTCUT) {
        return ManualAnswer::Target(answer.to_string());
    }
    match recent.last() {
        Some(last) => ManualAnswer::Repeat(last.clone()),
        None => ManualAnswer::NoRecent,
    }
}

/// Keys to run for a bulk batch, or nothing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BulkPlan {
    Run(Vec<IngestionKey>),
    Abort { already_seen: Vec<IngestionKey> },
}

/// Apply `policy` to a partitioned batch.
///
/// `unique` is the in-batch-deduplicated input; its order is kept. When
/// nothing was already seen the policy does not matter.
#[must_use]
pub fn plan_bulk(
    unique: &[IngestionKey],
    partition: &LedgerPartition,
    policy: DuplicatePolicy,
) -> BulkPlan {
    if partition.already_seen.is_empty() {
        return BulkPlan::Run(unique.to_vec());
    }

    match policy {
        DuplicatePolicy::Proceed => BulkPlan::Run(unique.to_vec()),
        DuplicatePolicy::Skip => {
            log::info!(
                "Skipped URL and selector combinations: {}",
                partition
                    .already_seen
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(", ")
            );
            BulkPlan::Run(
                unique
                    .iter()
                    .filter(|key| !partition.already_seen.contains(key))
                    .cloned()
                    .collect(),
            )
        }
        DuplicatePolicy::Abort => {
            log::info!(
                "Ingestion aborted due to {} existing URL and selector combinations",
                partition.already_seen.len()
            );
            BulkPlan::Abort {
                already_seen: partition.already_seen.clone(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(target: &str) -> IngestionKey {
        IngestionKey::new(target, "main")
    }

    fn partition() -> (Vec<IngestionKey>, LedgerPartition) {
        let unique = vec![key("a"), key("b"), key("c")];
        let partition = LedgerPartition {
            fresh: vec![key("a"), key("c")],
            already_seen: vec![key("b")],
        };
        (unique, partition)
    }

    #[test]
    fn manual_needs_confirmation_only_when_seen() {
        assert_eq!(decide_manual(false, false), DuplicatePolicy::Proceed);
        assert_eq!(decide_manual(true, true), DuplicatePolicy::Proceed);
        assert_eq!(decide_manual(true, false), DuplicatePolicy::Abort);
    }

    #[test]
    fn repeat_shortcut_picks_the_newest_key() {
        let recent = vec![key("a"), IngestionKey::new("b", "article")];
        assert_eq!(
            resolve_manual_answer(" P ", &recent),
            ManualAnswer::Repeat(IngestionKey::new("b", "article"))
        );
    }

    #[test]
    fn repeat_shortcut_without_history_is_not_a_target() {
        assert_eq!(resolve_manual_answer("p", &[]), ManualAnswer::NoRecent);
    }

    #[test]
    fn typed_url_is_trimmed() {
        assert_eq!(
            resolve_manual_answer(" https://x.com/a ", &[key("b")]),
            ManualAnswer::Target("https://x.com/a".to_string())
        );
    }

    #[test]
    fn proceed_keeps_everything_in_order() {
        let (unique, partition) = partition();
        assert_eq!(
            plan_bulk(&unique, &partition, DuplicatePolicy::Proceed),
            BulkPlan::Run(unique.clone())
        );
    }

    #[test]
    fn skip_drops_seen_keys() {
        let (unique, partition) = partition();
        assert_eq!(
            plan_bulk(&unique, &partition, DuplicatePolicy::Skip),
            BulkPlan::Run(vec![key("a"), key("c")])
        );
    }

    #[test]
    fn abort_runs_nothing() {
        let (unique, partition) = partition();
        assert_eq!(
            plan_bulk(&unique, &partition, DuplicatePolicy::Abort),
            BulkPlan::Abort {
                already_seen: vec![key("b")]
            }
        );
    }

    #[test]
    fn policy_parses_prompt_letters() {
        assert_eq!("c".parse::<DuplicatePolicy>(), Ok(DuplicatePolicy::Proceed));
        assert_eq!("Skip".parse::<DuplicatePolicy>(), Ok(DuplicatePolicy::Skip));
        assert!("later".parse::<DuplicatePolicy>().is_err());
    }
}
