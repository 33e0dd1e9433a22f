//! Static table of the plugins the site documents.

/// The slice of plugin metadata this crate needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PluginInfo {
    pub id: &'static str,
    pub name: &'static str,
    /// `{owner}/{repo}` on GitHub.
    pub repo: &'static str,
}

pub const PLUGINS: &[PluginInfo] = &[
    PluginInfo {
        id: "hyperperms",
        name: "HyperPerms",
        repo: "HyperSystemsDev/HyperPerms",
    },
    PluginInfo {
        id: "hyperfactions",
        name: "HyperFactions",
        repo: "HyperSystemsDev/HyperFactions",
    },
    PluginInfo {
        id: "ecotale",
        name: "Ecotale",
        repo: "HyperSystemsDev/Ecotale",
    },
    PluginInfo {
        id: "werchat",
        name: "WerChat",
        repo: "HyperSystemsDev/Werchat",
    },
    PluginInfo {
        id: "terranova",
        name: "TerraNova",
        repo: "HyperSystemsDev/TerraNova",
    },
];

pub fn find_plugin(id: &str) -> Option<&'static PluginInfo> {
    PLUGINS.iter().find(|p| p.id == id)
}

/// Display name, falling back to the id itself.
pub fn plugin_name(id: &str) -> &str {
    find_plugin(id).map(|p| p.name).unwrap_or(id)
}
