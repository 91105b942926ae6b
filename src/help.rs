// src/help.rs
//
// Embedded help. The legacy viewer showed a fixed topic tree (an index
// page with three themed pages under it) next to a web view; the tree and
// the pages live here, compiled in, and the viewer endpoint serves them
// read-only. None of this touches the catalog workflow.

use std::sync::LazyLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HelpContent {
    /// Embedded HTML body.
    Local(&'static str),
    /// External document the viewer should navigate to.
    Remote(&'static str),
}

#[derive(Debug)]
pub struct HelpTopic {
    pub id: &'static str,
    pub title: &'static str,
    pub content: HelpContent,
    pub children: Vec<HelpTopic>,
}

static HELP_INDEX: LazyLock<Vec<HelpTopic>> = LazyLock::new(|| {
    vec![
        HelpTopic {
            id: "index",
            title: "Index",
            content: HelpContent::Local(include_str!("help/index.html")),
            children: vec![
                HelpTopic {
                    id: "tema1",
                    title: "Tema 1: crear productos",
                    content: HelpContent::Local(include_str!("help/tema1.html")),
                    children: vec![],
                },
                HelpTopic {
                    id: "tema2",
                    title: "Tema 2: modificar y eliminar",
                    content: HelpContent::Local(include_str!("help/tema2.html")),
                    children: vec![],
                },
                HelpTopic {
                    id: "tema3",
                    title: "Tema 3: informes",
                    content: HelpContent::Local(include_str!("help/tema3.html")),
                    children: vec![],
                },
            ],
        },
        HelpTopic {
            id: "manual",
            title: "Manual en línea",
            content: HelpContent::Remote("https://docs.example.com/productos/manual.html"),
            children: vec![],
        },
    ]
});

pub fn help_index() -> &'static [HelpTopic] {
    &HELP_INDEX
}

/// Depth-first lookup over the topic tree.
pub fn find_topic(id: &str) -> Option<&'static HelpTopic> {
    fn walk<'a>(topics: &'a [HelpTopic], id: &str) -> Option<&'a HelpTopic> {
        for topic in topics {
            if topic.id == id {
                return Some(topic);
            }
            if let Some(found) = walk(&topic.children, id) {
                return Some(found);
            }
        }
        None
    }
    walk(&HELP_INDEX, id)
}
