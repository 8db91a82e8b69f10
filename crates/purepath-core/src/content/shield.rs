//! Device lockdown guides.
//!
//! Native OS restrictions are harder to switch off in the heat of the moment
//! than network filters, so every guide targets the platform's own parental
//! controls.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuideStep {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShieldGuide {
    pub id: String,
    pub platform: String,
    pub icon_name: String,
    pub difficulty: Difficulty,
    pub steps: Vec<GuideStep>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

fn step(title: &str, description: &str) -> GuideStep {
    GuideStep {
        title: title.to_string(),
        description: description.to_string(),
    }
}

/// All bundled guides, in display order.
pub fn builtin_guides() -> Vec<ShieldGuide> {
    vec![
        ShieldGuide {
            id: "android".into(),
            platform: "Android".into(),
            icon_name: "android".into(),
            difficulty: Difficulty::Easy,
            steps: vec![
                step("Open Settings", "Go to Settings > Digital Wellbeing & parental controls."),
                step(
                    "Set Up Parental Controls",
                    r#"Tap "Set up parental controls". Yes, do this for yourself. Choose "Get started" then "Child or teen"."#,
                ),
                step(
                    "Link Account",
                    r#"You will need a secondary Google account to act as the "Parent". Link it."#,
                ),
                step(
                    "Chrome Filters",
                    r#"In the controls, select Chrome > "Try to block explicit sites". This enforces SafeSearch at the browser level."#,
                ),
                step(
                    "App Limits",
                    "Set daily timers to 0 minutes for problematic apps to lock them out completely.",
                ),
            ],
            warning: Some(
                "Requires a second Google account (friend/partner) to be effective.".into(),
            ),
        },
        ShieldGuide {
            id: "ios".into(),
            platform: "iOS (iPhone)".into(),
            icon_name: "apple".into(),
            difficulty: Difficulty::Medium,
            steps: vec![
                step("Screen Time", "Go to Settings > Screen Time. Turn it on."),
                step(
                    "Content Restrictions",
                    r#"Tap "Content & Privacy Restrictions". Toggle it ON."#,
                ),
                step(
                    "Web Content",
                    r#"Tap "Content Restrictions" > "Web Content". Select "Limit Adult Websites"."#,
                ),
                step(
                    "Disallow Apps",
                    r#"Go back to "iTunes & App Store Purchases". Set "Installing Apps" to "Don't Allow" to prevent downloading new browsers."#,
                ),
                step(
                    "Lock It",
                    r#"Go back to main Screen Time menu. Tap "Use Screen Time Passcode". Have a friend set this for you."#,
                ),
            ],
            warning: None,
        },
        ShieldGuide {
            id: "mac".into(),
            platform: "MacOS".into(),
            icon_name: "monitor".into(),
            difficulty: Difficulty::Easy,
            steps: vec![
                step("System Settings", "Open System Settings > Screen Time."),
                step("Content & Privacy", r#"Click "Content & Privacy". Turn it on."#),
                step(
                    "Store Restrictions",
                    r#"In "Store Restrictions", set "Explicit Content" to disallowed."#,
                ),
                step(
                    "Web Content",
                    r#"In "Web Content Access", select "Limit Adult Websites"."#,
                ),
            ],
            warning: None,
        },
        ShieldGuide {
            id: "windows".into(),
            platform: "Windows".into(),
            icon_name: "windows".into(),
            difficulty: Difficulty::Hard,
            steps: vec![
                step(
                    "Create Family Group",
                    "Go to account.microsoft.com/family. Create a family group.",
                ),
                step(
                    "Add Member",
                    r#"Add a new "Child" account. This will be your main login."#,
                ),
                step(
                    "Content Filters",
                    r#"Click "Content filters" > "Web and search". Turn on "Filter inappropriate websites"."#,
                ),
                step(
                    "Apps",
                    r#"Go to "Apps and games". Block specific browsers that bypass filters."#,
                ),
            ],
            warning: Some(
                "The 'Child' account method is the only native way to enforce blocks on Windows."
                    .into(),
            ),
        },
    ]
}

/// Look up a guide by id (case-insensitive).
pub fn find_guide(id: &str) -> Option<ShieldGuide> {
    builtin_guides()
        .into_iter()
        .find(|g| g.id.eq_ignore_ascii_case(id))
}
