//! The bundled recovery map.

use indoc::indoc;

use super::{TopicCategory, TopicNode, ROOT_ID};

fn topic(
    id: &str,
    title: &str,
    category: TopicCategory,
    summary: &str,
    content: &str,
    children: &[&str],
    related: &[&str],
) -> TopicNode {
    TopicNode {
        id: id.to_string(),
        title: title.to_string(),
        category,
        summary: summary.to_string(),
        content: content.trim_end().to_string(),
        children_ids: children.iter().map(|s| s.to_string()).collect(),
        related_ids: related.iter().map(|s| s.to_string()).collect(),
        icon: None,
    }
}

/// Topics in authored order. Search results follow this order.
pub(super) fn builtin_topics() -> Vec<TopicNode> {
    use TopicCategory::*;

    vec![
        topic(
            ROOT_ID,
            "The Path",
            Strategy,
            "Your map to recovery. Choose a path.",
            indoc! {r#"
                Welcome to the Recovery Map. This is not a linear journey. Explore the neuroscience to understand the "Why", or jump to strategies for the "How".
            "#},
            &["science_root", "strategy_root", "philosophy_root"],
            &[],
        ),
        // Science
        topic(
            "science_root",
            "Neuroscience",
            Science,
            "The mechanics of addiction.",
            indoc! {"
                # Your Brain on Porn

                Addiction is a mechanical issue in the brain involving dopamine, DeltaFosB, and frontal cortex hypoactivity. It is not a moral failing.
            "},
            &["dopamine", "deltafosb", "hypofrontality"],
            &["strategy_root"],
        ),
        topic(
            "dopamine",
            "Dopamine Cycle",
            Science,
            "The molecule of craving.",
            indoc! {r#"
                ### The Motivation Molecule

                Dopamine drives you to seek rewards. High-speed internet porn floods the brain with unnatural levels of dopamine, causing receptors to "burn out" (downregulate).
            "#},
            &["desensitization"],
            &["anhedonia"],
        ),
        topic(
            "desensitization",
            "Desensitization",
            Science,
            r#"Why you need "more"."#,
            indoc! {r#"
                As receptors die off to protect the brain, you need more extreme stimulus to feel "normal". This leads to escalation into genres you may not even like.
            "#},
            &[],
            &["dopamine"],
        ),
        topic(
            "deltafosb",
            "DeltaFosB",
            Science,
            "The neural switch.",
            indoc! {"
                DeltaFosB is a protein that builds up in the brain with chronic use. It physically changes neural pathways, making the addiction the top priority. It takes weeks to fade.
            "},
            &[],
            &["withdrawal"],
        ),
        topic(
            "hypofrontality",
            "Hypofrontality",
            Science,
            "Erosion of Willpower.",
            indoc! {r#"
                Addiction reduces blood flow to the Prefrontal Cortex (your decision maker). You literally lose the capacity to say "no". Recovery restores this.
            "#},
            &[],
            &[],
        ),
        // Strategy
        topic(
            "strategy_root",
            "Strategy",
            Strategy,
            "Tactics for victory.",
            indoc! {"
                # Protocols

                Hope is not a strategy. You need systems. Design your life so you don't need willpower.
            "},
            &["environment", "urge_surfing", "transmutation"],
            &["science_root"],
        ),
        topic(
            "environment",
            "Environment",
            Strategy,
            "Friction is your friend.",
            indoc! {"
                Make the bad habit impossible or annoying.

                * Charge phone in the kitchen.
                * Use grayscale mode.
                * Keep bedroom door open.
            "},
            &[],
            &[],
        ),
        topic(
            "urge_surfing",
            "Urge Surfing",
            Strategy,
            "Ride the wave.",
            indoc! {r#"
                Urges are like waves. They crest and break in ~20 mins. Don't fight it. Observe it. "I am feeling an urge." Wait for it to pass.
            "#},
            &[],
            &["mindfulness"],
        ),
        topic(
            "transmutation",
            "Transmutation",
            Strategy,
            "Use the energy.",
            indoc! {"
                Sexual energy is creative fuel. Do not suppress it; redirect it immediately into exercise, work, or creation.
            "},
            &[],
            &[],
        ),
        // Philosophy
        topic(
            "philosophy_root",
            "Philosophy",
            Philosophy,
            "Mindset & Meaning.",
            indoc! {r#"
                # The Stoic Way

                "You have power over your mind - not outside events." - Marcus Aurelius.
            "#},
            &["stoicism", "identity"],
            &["strategy_root"],
        ),
        topic(
            "stoicism",
            "Stoic Discipline",
            Philosophy,
            "Control what you can.",
            indoc! {"
                You cannot control the thought popping up. You CAN control if you entertain it.
            "},
            &[],
            &[],
        ),
        topic(
            "identity",
            "Identity Shift",
            Philosophy,
            "Who are you?",
            indoc! {r#"
                Stop trying to "quit". Start BEING a person who doesn't watch porn. Shift from "I can't" to "I don't".
            "#},
            &[],
            &[],
        ),
    ]
}
