use super::View;
use crate::discover::RankedTea;
use crate::teasonality::personalities::{
    Personality, ALTERNATE_ENDING, EXTRA_QUESTION, EXTRA_QUESTION_INTRO,
};
use crate::teasonality::sampler::{Recommendation, Slot};
use crate::teasonality::{QuizOutcome, QuizStep};
use crate::types::record::TeaRecord;

pub const NO_MATCHES: &str = "No matches: every tea was filtered out by your preferences.";

pub fn to_markdown(view: &View<'_>) -> String {
    match view {
        View::Catalogue { source, teas, .. } => catalogue(source, teas),
        View::Discover { matches, .. } => discover(matches),
        View::Teasonality(outcome) => teasonality(outcome),
        View::Personalities { personalities } => personality_table(personalities),
    }
}

fn catalogue(source: &str, teas: &[TeaRecord]) -> String {
    let mut output = String::new();
    output.push_str("# Ranked Teas\n\n");
    output.push_str(&format!("Source: {source} ({} teas)\n\n", teas.len()));
    if teas.is_empty() {
        output.push_str("- none\n");
        return output;
    }

    output.push_str("| # | Name | Brand | Type | Score | Price (350ml) | Link |\n");
    output.push_str("|---|------|-------|------|-------|---------------|------|\n");
    for tea in teas {
        output.push_str(&format!(
            "| {} | {} | {} | {} | {} | ${:.2} | {} |\n",
            tea.rank,
            cell(&tea.name),
            cell(&tea.brand),
            cell(&tea.tea_type),
            score(tea.score),
            tea.price_per_portion,
            tea.link.as_deref().map(cell).unwrap_or_else(|| "-".to_string())
        ));
    }
    output
}

fn discover(matches: &[RankedTea]) -> String {
    let mut output = String::new();
    output.push_str("# Discover\n\n");
    if matches.is_empty() {
        output.push_str(NO_MATCHES);
        output.push('\n');
        return output;
    }

    for (position, entry) in matches.iter().enumerate() {
        output.push_str(&format!(
            "{}. {} ({}, {}): {} (base {}, x{:.3})\n",
            position + 1,
            entry.tea.name,
            entry.tea.brand,
            entry.tea.tea_type,
            score(entry.normalized_score),
            score(entry.tea.score),
            entry.multiplier
        ));
    }
    output
}

fn teasonality(outcome: &QuizOutcome) -> String {
    let mut output = String::new();
    output.push_str("# Teasonality\n\n");
    match (outcome.step, outcome.personality) {
        (QuizStep::ExtraQuestion, _) => {
            output.push_str(EXTRA_QUESTION_INTRO);
            output.push_str("\n\n");
            output.push_str(&format!("**{EXTRA_QUESTION}** (yes / no)\n"));
        }
        (QuizStep::AlternateEnding, _) => {
            output.push_str(ALTERNATE_ENDING);
            output.push('\n');
        }
        (QuizStep::Result, Some(personality)) => {
            output.push_str(&format!(
                "## {}\n\nType: {}\n\n{}\n",
                personality.name, personality.key, personality.description
            ));
            if !outcome.recommendations.is_empty() {
                output.push_str("\n## Recommended Teas\n\n");
                for recommendation in &outcome.recommendations {
                    output.push_str(&recommendation_line(recommendation));
                }
            }
        }
        (QuizStep::Result, None) => output.push_str("- no result\n"),
        (QuizStep::Question(index), _) => {
            output.push_str(&format!("Quiz in progress: question {} of 6\n", index + 1));
        }
    }
    output
}

fn recommendation_line(recommendation: &Recommendation) -> String {
    let label = match recommendation.slot {
        Slot::Energy => "Energy Match",
        Slot::Adventure => "Adventure Match",
        Slot::Flavor => "Flavor Match",
        Slot::Filler => "Wildcard",
    };
    let tea = &recommendation.tea;
    let mut line = format!(
        "- [{label}] {} ({}, {}) {}: {}",
        tea.name,
        tea.brand,
        tea.tea_type,
        score(tea.score),
        tea.description
    );
    if let Some(link) = &tea.link {
        line.push_str(&format!(" <{link}>"));
    }
    line.push('\n');
    line
}

fn personality_table(personalities: &[Personality]) -> String {
    let mut output = String::new();
    output.push_str("# Teasonality Types\n\n");
    for personality in personalities {
        output.push_str(&format!("- {} {}\n", personality.key, personality.name));
    }
    output
}

fn score(value: f64) -> String {
    if value.is_nan() {
        "-".to_string()
    } else {
        format!("{value:.1}")
    }
}

fn cell(text: &str) -> String {
    text.replace('|', "\\|")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalogue::SortState;
    use crate::teasonality::personalities::{lookup, PERSONALITIES};
    use crate::types::record::fixtures::tea;

    #[test]
    fn catalogue_table_lists_rank_and_price() {
        let mut teas = vec![tea("Sencha", "Green", 8.5)];
        teas[0].rank = 1;
        teas[0].link = Some("https://shop.example/sencha".to_string());
        let rendered = to_markdown(&View::Catalogue {
            source: "teareviews.csv",
            sort: SortState::default(),
            teas: &teas,
        });
        assert!(rendered.contains("# Ranked Teas"));
        assert!(rendered.contains("| 1 | Sencha | House | Green | 8.5 | $0.50 |"));
        assert!(rendered.contains("https://shop.example/sencha"));
    }

    #[test]
    fn empty_discover_has_distinct_message() {
        let profile = crate::types::profile::PreferenceProfile::default();
        let rendered = to_markdown(&View::Discover {
            profile: &profile,
            matches: &[],
        });
        assert!(rendered.contains(NO_MATCHES));
    }

    #[test]
    fn result_lists_slot_labels() {
        let personality = lookup("EAB").expect("EAB exists");
        let outcome = QuizOutcome {
            step: QuizStep::Result,
            key: Some("EAB".to_string()),
            personality: Some(personality),
            recommendations: vec![
                Recommendation {
                    slot: Slot::Energy,
                    tea: tea("Assam", "Black", 9.0),
                },
                Recommendation {
                    slot: Slot::Filler,
                    tea: tea("Sencha", "Green", f64::NAN),
                },
            ],
        };
        let rendered = to_markdown(&View::Teasonality(&outcome));
        assert!(rendered.contains("## The Trailblazer"));
        assert!(rendered.contains("Type: EAB"));
        assert!(rendered.contains("[Energy Match] Assam"));
        assert!(rendered.contains("[Wildcard] Sencha (House, Green) -"));
    }

    #[test]
    fn extra_question_and_alternate_ending_render_prompts() {
        let extra = QuizOutcome {
            step: QuizStep::ExtraQuestion,
            key: None,
            personality: None,
            recommendations: Vec::new(),
        };
        assert!(to_markdown(&View::Teasonality(&extra)).contains(EXTRA_QUESTION));

        let ending = QuizOutcome {
            step: QuizStep::AlternateEnding,
            ..extra
        };
        assert!(to_markdown(&View::Teasonality(&ending)).contains("BANNED"));
    }

    #[test]
    fn personality_table_lists_all_types() {
        let rendered = to_markdown(&View::Personalities {
            personalities: &PERSONALITIES,
        });
        assert_eq!(rendered.lines().filter(|line| line.starts_with("- ")).count(), 27);
    }
}
