//! Navigation shipped with the site.

use super::{NavItem, NavSection};

fn section(title: &str, owner: &str, pages: &[(&str, &str)]) -> NavSection {
    NavSection::new(
        title,
        pages.iter().map(|(title, path)| {
            let href = if path.is_empty() {
                format!("/plugins/{}/wiki", owner)
            } else {
                format!("/plugins/{}/wiki/{}", owner, path)
            };
            NavItem::new(*title, href)
        }),
    )
}

pub fn hyperperms_navigation() -> Vec<NavSection> {
    vec![section("Overview", "hyperperms", &[("Introduction", "")])]
}

pub fn hyperhomes_navigation() -> Vec<NavSection> {
    vec![section("Overview", "hyperhomes", &[("Introduction", "")])]
}

pub fn hyperfactions_navigation() -> Vec<NavSection> {
    const OWNER: &str = "hyperfactions";
    vec![
        section(
            "Getting Started",
            OWNER,
            &[
                ("Installation", "getting-started/installation"),
                ("Configuration", "getting-started/configuration"),
                ("First Setup", "getting-started/first-setup"),
            ],
        ),
        section(
            "Guides",
            OWNER,
            &[
                ("GUI Walkthrough", "guides/gui-walkthrough"),
                ("Starting a Faction", "guides/starting-faction"),
                ("Growing Your Faction", "guides/growing-your-faction"),
                ("Diplomacy Strategy", "guides/diplomacy-strategy"),
                ("Defending Territory", "guides/defending-territory"),
            ],
        ),
        section(
            "Concepts",
            OWNER,
            &[
                ("Factions", "concepts/factions"),
                ("Power System", "concepts/power-system"),
                ("Territories", "concepts/territories"),
                ("Diplomacy", "concepts/diplomacy"),
                ("Roles", "concepts/roles"),
                ("Zones", "concepts/zones"),
            ],
        ),
        section(
            "Commands",
            OWNER,
            &[
                ("Basic", "commands/basic"),
                ("Territory", "commands/territory"),
                ("Diplomacy", "commands/diplomacy"),
                ("Member Management", "commands/member-management"),
                ("Home & Teleport", "commands/home-teleport"),
                ("Communication", "commands/communication"),
                ("Settings", "commands/settings"),
                ("Admin", "commands/admin"),
            ],
        ),
        section(
            "Reference",
            OWNER,
            &[
                ("Permissions", "reference/permissions"),
                ("Configuration", "reference/configuration"),
            ],
        ),
    ]
}

pub fn builtin_navigation() -> Vec<(String, Vec<NavSection>)> {
    vec![
        ("hyperperms".to_string(), hyperperms_navigation()),
        ("hyperhomes".to_string(), hyperhomes_navigation()),
        ("hyperfactions".to_string(), hyperfactions_navigation()),
    ]
}
