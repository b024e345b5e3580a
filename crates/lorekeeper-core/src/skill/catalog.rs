//! Id-indexed snapshot of a skill tree.
//!
//! `SkillCatalog` owns the skills, links, class hierarchy, and quest names of
//! one `SkillGraph` and builds a reverse index of incoming links per child.
//! It is immutable once built; rebuild it when the graph changes.

use std::collections::HashMap;

use petgraph::algo::tarjan_scc;
use petgraph::graph::DiGraph;

use lorekeeper_types::availability::{Availability, SkillAvailability};
use lorekeeper_types::character::PlayerCharacter;
use lorekeeper_types::error::CatalogError;
use lorekeeper_types::quest::{Quest, QuestId};
use lorekeeper_types::skill::{Skill, SkillGraph, SkillId, SkillLink};

use super::availability;
use super::lineage::ClassHierarchy;

#[derive(Debug, Clone)]
pub struct SkillCatalog {
    skills: HashMap<SkillId, Skill>,
    links: Vec<SkillLink>,
    incoming: HashMap<SkillId, Vec<usize>>,
    classes: ClassHierarchy,
    quests: HashMap<QuestId, Quest>,
}

impl SkillCatalog {
    /// Index a skill graph.
    ///
    /// Self-loop links can only arrive through deserialization (the
    /// constructor rejects them); they are dropped here with a warning.
    pub fn new(graph: SkillGraph) -> Self {
        let SkillGraph {
            skills,
            links,
            classes,
            quests,
        } = graph;

        let links: Vec<SkillLink> = links
            .into_iter()
            .filter(|link| {
                let keep = link.parent_id != link.child_id;
                if !keep {
                    tracing::warn!(skill = %link.parent_id, "dropping self-referencing skill link");
                }
                keep
            })
            .collect();

        let mut incoming: HashMap<SkillId, Vec<usize>> = HashMap::new();
        for (idx, link) in links.iter().enumerate() {
            incoming.entry(link.child_id).or_default().push(idx);
        }

        Self {
            skills: skills.into_iter().map(|s| (s.id, s)).collect(),
            links,
            incoming,
            classes: ClassHierarchy::new(classes),
            quests: quests.into_iter().map(|q| (q.id, q)).collect(),
        }
    }

    /// Bound class-lineage walks to `max_depth` ancestors.
    pub fn with_max_lineage_depth(mut self, max_depth: usize) -> Self {
        self.classes = self.classes.with_max_depth(max_depth);
        self
    }

    pub fn skill(&self, id: SkillId) -> Option<&Skill> {
        self.skills.get(&id)
    }

    pub fn skills(&self) -> impl Iterator<Item = &Skill> {
        self.skills.values()
    }

    pub fn links(&self) -> &[SkillLink] {
        &self.links
    }

    pub fn classes(&self) -> &ClassHierarchy {
        &self.classes
    }

    /// Links whose child is `child`, in graph document order.
    pub fn incoming_links(&self, child: SkillId) -> impl Iterator<Item = &SkillLink> {
        self.incoming
            .get(&child)
            .into_iter()
            .flatten()
            .map(|&idx| &self.links[idx])
    }

    /// Display name for a skill, falling back to `Skill #id`.
    pub fn skill_name(&self, id: SkillId) -> String {
        self.skills
            .get(&id)
            .map(|s| s.name.clone())
            .unwrap_or_else(|| format!("Skill #{id}"))
    }

    /// Display name for a quest, falling back to `Quest #id`.
    pub fn quest_name(&self, id: QuestId) -> String {
        self.quests
            .get(&id)
            .map(|q| q.name.clone())
            .unwrap_or_else(|| format!("Quest #{id}"))
    }

    /// Evaluate a registered skill for a character.
    pub fn evaluate(
        &self,
        skill_id: SkillId,
        character: &PlayerCharacter,
    ) -> Result<Availability, CatalogError> {
        let skill = self
            .skill(skill_id)
            .ok_or(CatalogError::SkillNotFound(skill_id.0))?;
        Ok(availability::evaluate(skill, character, self))
    }

    /// Availability of every skill for a character, sorted by name then id.
    pub fn availability_for(&self, character: &PlayerCharacter) -> Vec<SkillAvailability> {
        let mut skills: Vec<&Skill> = self.skills.values().collect();
        skills.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));

        skills
            .into_iter()
            .map(|skill| SkillAvailability {
                skill_id: skill.id,
                name: skill.name.clone(),
                availability: availability::evaluate(skill, character, self),
            })
            .collect()
    }

    /// Find a set of skills whose links form a cycle.
    ///
    /// The evaluator never checks for cycles (a cycle only makes its members
    /// permanently locked), so this is for authoring tools. Returns the
    /// members of one strongly connected component, sorted by id.
    pub fn find_cycle(&self) -> Option<Vec<SkillId>> {
        let mut graph = DiGraph::<SkillId, ()>::new();
        let mut node_indices = HashMap::new();

        let mut ids: Vec<SkillId> = self.skills.keys().copied().collect();
        ids.sort();
        for id in ids {
            node_indices.insert(id, graph.add_node(id));
        }

        for link in &self.links {
            if let (Some(&from), Some(&to)) =
                (node_indices.get(&link.parent_id), node_indices.get(&link.child_id))
            {
                graph.add_edge(from, to, ());
            }
        }

        tarjan_scc(&graph)
            .into_iter()
            .filter(|component| component.len() > 1)
            .map(|component| {
                let mut members: Vec<SkillId> = component.into_iter().map(|idx| graph[idx]).collect();
                members.sort();
                members
            })
            .min()
    }

    /// Structural checks for authoring tools: links reference known skills,
    /// links are acyclic, and the class tree is well formed.
    pub fn validate(&self) -> Result<(), CatalogError> {
        for link in &self.links {
            if !self.skills.contains_key(&link.parent_id) || !self.skills.contains_key(&link.child_id) {
                return Err(CatalogError::DanglingLink {
                    parent: link.parent_id.0,
                    child: link.child_id.0,
                });
            }
        }

        if let Some(members) = self.find_cycle() {
            let names: Vec<String> = members.iter().map(|id| self.skill_name(*id)).collect();
            return Err(CatalogError::CycleDetected(format!(
                "involving skills {}",
                names.join(", ")
            )));
        }

        self.classes.validate()
    }
}
