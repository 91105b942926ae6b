// src/dtos/help.rs
use serde::Serialize;

use crate::help::{HelpContent, HelpTopic};

#[derive(Debug, Serialize)]
pub struct HelpTopicResponse {
    pub id: &'static str,
    pub title: &'static str,
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<&'static str>,
    pub children: Vec<HelpTopicResponse>,
}

impl From<&HelpTopic> for HelpTopicResponse {
    fn from(topic: &HelpTopic) -> Self {
        let (kind, url) = match topic.content {
            HelpContent::Local(_) => ("local", None),
            HelpContent::Remote(target) => ("remote", Some(target)),
        };
        Self {
            id: topic.id,
            title: topic.title,
            kind,
            url,
            children: topic.children.iter().map(HelpTopicResponse::from).collect(),
        }
    }
}
