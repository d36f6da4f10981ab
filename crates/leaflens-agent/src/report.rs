//! Plain-text rendering of diagnoses and knowledge-base entries.

use std::fmt::Write;

use leaflens_common::confidence::format_percent;
use leaflens_kb::{DiseaseRecord, KnowledgeBase, TreatmentGroups};
use leaflens_ranker::{EnrichedCandidate, EnrichedDiagnosis, RiskLevel};

const NO_DATA: &str = "No data";

pub fn render_diagnosis(d: &EnrichedDiagnosis<'_>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Diagnosis: {}", candidate_line(&d.top1));
    if d.risk == RiskLevel::High {
        let _ = writeln!(out, "Risk: HIGH, act promptly");
    }

    let alternatives = d.alternatives();
    if !alternatives.is_empty() {
        let _ = writeln!(out, "\nTop predictions:");
        for (i, c) in alternatives.iter().enumerate() {
            let _ = writeln!(out, "  {}. {}", i + 1, candidate_line(c));
        }
    }

    out.push('\n');
    out.push_str(&render_record_details(d.top1.record));
    out
}

fn candidate_line(c: &EnrichedCandidate<'_>) -> String {
    format!("{} {} ({} confidence)", c.display_name(), c.percent(), c.tier().as_str())
}

/// Symptoms and grouped treatments, with placeholders when unresolved.
pub fn render_record_details(record: Option<&DiseaseRecord>) -> String {
    let mut out = String::new();
    let symptoms: Vec<&str> = record.map(|r| r.symptoms.iter().map(String::as_str).collect()).unwrap_or_default();
    section(&mut out, "Symptoms", &symptoms);

    match record.map(TreatmentGroups::from_record) {
        Some(groups) if !groups.is_empty() => {
            section(&mut out, "Treatment", &groups.all);
            if !groups.organic.is_empty() {
                section(&mut out, "Organic options", &groups.organic);
            }
            if !groups.chemical.is_empty() {
                section(&mut out, "Chemical options", &groups.chemical);
            }
        }
        _ => section(&mut out, "Treatment", &[]),
    }
    out
}

fn section(out: &mut String, title: &str, lines: &[&str]) {
    let _ = writeln!(out, "{title}:");
    if lines.is_empty() {
        let _ = writeln!(out, "  - {NO_DATA}");
    }
    for line in lines {
        let _ = writeln!(out, "  - {line}");
    }
}

/// One line per label: how it resolved, or that it did not.
pub fn render_resolution(kb: &KnowledgeBase, label: &str) -> String {
    match kb.resolve_match(label) {
        Some(m) => format!("{label:?} -> {} [{:?}] {}", m.record.key, m.matched_by, m.record.name),
        None => format!("{label:?} -> unresolved"),
    }
}

pub fn render_knowledge_base(kb: &KnowledgeBase) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} records:", kb.n_records());
    for r in kb.records() {
        let _ = writeln!(out, "  {} ({})", r.key, r.name);
    }
    let _ = writeln!(out, "\n{} aliases:", kb.n_aliases());
    for (alias, key) in kb.aliases() {
        let _ = writeln!(out, "  {alias} -> {key}");
    }
    out
}

/// Label and percentage, as shown in the recent-diagnoses list.
pub fn render_history_line(label: &str, probability: f64) -> String {
    format!("{label} {}", format_percent(probability))
}
