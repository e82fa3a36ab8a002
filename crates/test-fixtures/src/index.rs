//! In-memory vector and graph index doubles with failure injection.

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;

use async_trait::async_trait;

use noesis_core::constants::DEFAULT_EMBEDDING_MODEL;
use noesis_core::entity::{KnowledgeEntity, Relation, RelationKind};
use noesis_core::errors::{NoesisResult, StoreError};
use noesis_core::models::{SearchFilter, SimilarityHit};
use noesis_core::traits::{GraphIndex, VectorIndex};

fn cosine(a: &[f32], b: &[f32]) -> f64 {
    let dot: f64 = a.iter().zip(b).map(|(x, y)| f64::from(*x) * f64::from(*y)).sum();
    let na: f64 = a.iter().map(|x| f64::from(*x) * f64::from(*x)).sum::<f64>().sqrt();
    let nb: f64 = b.iter().map(|x| f64::from(*x) * f64::from(*x)).sum::<f64>().sqrt();
    if na == 0.0 || nb == 0.0 {
        return 0.0;
    }
    (dot / (na * nb)).clamp(0.0, 1.0)
}

/// In-memory similarity index. Cosine over each entity's default-model
/// embedding; entities without one never match a search.
#[derive(Default)]
pub struct MemoryVectorIndex {
    entities: RwLock<HashMap<String, KnowledgeEntity>>,
    fail_add: AtomicBool,
    fail_delete: AtomicBool,
}

impl MemoryVectorIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make subsequent `add` calls fail.
    pub fn set_fail_add(&self, fail: bool) {
        self.fail_add.store(fail, Ordering::SeqCst);
    }

    /// Make subsequent `delete` calls fail.
    pub fn set_fail_delete(&self, fail: bool) {
        self.fail_delete.store(fail, Ordering::SeqCst);
    }

    pub fn len(&self) -> usize {
        self.entities.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl VectorIndex for MemoryVectorIndex {
    async fn add(&self, entity: &KnowledgeEntity) -> NoesisResult<()> {
        if self.fail_add.load(Ordering::SeqCst) {
            return Err(StoreError::VectorIndex {
                message: "injected add failure".to_string(),
            }
            .into());
        }
        self.entities
            .write()
            .unwrap()
            .insert(entity.id.clone(), entity.clone());
        Ok(())
    }

    async fn get(&self, id: &str) -> NoesisResult<Option<KnowledgeEntity>> {
        Ok(self.entities.read().unwrap().get(id).cloned())
    }

    async fn update(&self, entity: &KnowledgeEntity) -> NoesisResult<()> {
        let mut entities = self.entities.write().unwrap();
        if !entities.contains_key(&entity.id) {
            return Err(StoreError::VectorIndex {
                message: format!("unknown entity {}", entity.id),
            }
            .into());
        }
        entities.insert(entity.id.clone(), entity.clone());
        Ok(())
    }

    async fn delete(&self, id: &str) -> NoesisResult<()> {
        if self.fail_delete.load(Ordering::SeqCst) {
            return Err(StoreError::VectorIndex {
                message: "injected delete failure".to_string(),
            }
            .into());
        }
        self.entities.write().unwrap().remove(id);
        Ok(())
    }

    async fn search_similar(
        &self,
        vector: &[f32],
        limit: usize,
        filter: Option<&SearchFilter>,
    ) -> NoesisResult<Vec<SimilarityHit>> {
        let entities = self.entities.read().unwrap();
        let mut hits: Vec<SimilarityHit> = entities
            .values()
            .filter(|e| filter.map_or(true, |f| f.matches(e)))
            .filter_map(|e| {
                e.embeddings.get(DEFAULT_EMBEDDING_MODEL).map(|v| SimilarityHit {
                    entity: e.clone(),
                    similarity: cosine(vector, v),
                })
            })
            .collect();
        hits.sort_by(|a, b| b.similarity.total_cmp(&a.similarity));
        hits.truncate(limit);
        Ok(hits)
    }
}

/// In-memory relationship graph. Adjacency lists with bounded-depth DFS
/// path search and BFS neighborhood expansion.
#[derive(Default)]
pub struct MemoryGraphIndex {
    nodes: RwLock<HashMap<String, KnowledgeEntity>>,
    edges: RwLock<HashMap<String, Vec<Relation>>>,
    fail_add: AtomicBool,
    fail_add_relation: AtomicBool,
    fail_related: AtomicBool,
}

impl MemoryGraphIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make subsequent `add` calls fail (drives rollback tests).
    pub fn set_fail_add(&self, fail: bool) {
        self.fail_add.store(fail, Ordering::SeqCst);
    }

    /// Make subsequent `add_relation` calls fail.
    pub fn set_fail_add_relation(&self, fail: bool) {
        self.fail_add_relation.store(fail, Ordering::SeqCst);
    }

    /// Make subsequent `related_entities` calls fail (drives
    /// degraded-search tests).
    pub fn set_fail_related(&self, fail: bool) {
        self.fail_related.store(fail, Ordering::SeqCst);
    }

    pub fn contains(&self, id: &str) -> bool {
        self.nodes.read().unwrap().contains_key(id)
    }

    pub fn edge_count(&self, id: &str) -> usize {
        self.edges.read().unwrap().get(id).map_or(0, Vec::len)
    }

    fn graph_err(message: impl Into<String>) -> StoreError {
        StoreError::GraphIndex {
            message: message.into(),
        }
    }
}

#[async_trait]
impl GraphIndex for MemoryGraphIndex {
    async fn add(&self, entity: &KnowledgeEntity) -> NoesisResult<()> {
        if self.fail_add.load(Ordering::SeqCst) {
            return Err(Self::graph_err("injected add failure").into());
        }
        self.nodes
            .write()
            .unwrap()
            .insert(entity.id.clone(), entity.clone());
        Ok(())
    }

    async fn get(&self, id: &str) -> NoesisResult<Option<KnowledgeEntity>> {
        Ok(self.nodes.read().unwrap().get(id).cloned())
    }

    async fn update(&self, entity: &KnowledgeEntity) -> NoesisResult<()> {
        let mut nodes = self.nodes.write().unwrap();
        if !nodes.contains_key(&entity.id) {
            return Err(Self::graph_err(format!("unknown entity {}", entity.id)).into());
        }
        nodes.insert(entity.id.clone(), entity.clone());
        Ok(())
    }

    async fn delete(&self, id: &str) -> NoesisResult<()> {
        self.nodes.write().unwrap().remove(id);
        self.edges.write().unwrap().remove(id);
        Ok(())
    }

    async fn add_relation(&self, source_id: &str, relation: &Relation) -> NoesisResult<()> {
        if self.fail_add_relation.load(Ordering::SeqCst) {
            return Err(Self::graph_err("injected add_relation failure").into());
        }
        self.edges
            .write()
            .unwrap()
            .entry(source_id.to_string())
            .or_default()
            .push(relation.clone());
        Ok(())
    }

    async fn relations(
        &self,
        id: &str,
        kinds: Option<&[RelationKind]>,
    ) -> NoesisResult<Vec<Relation>> {
        let edges = self.edges.read().unwrap();
        let all = edges.get(id).cloned().unwrap_or_default();
        Ok(match kinds {
            Some(kinds) => all.into_iter().filter(|r| kinds.contains(&r.kind)).collect(),
            None => all,
        })
    }

    async fn search_path(
        &self,
        from_id: &str,
        to_id: &str,
        max_depth: usize,
    ) -> NoesisResult<Vec<Vec<Relation>>> {
        let edges = self.edges.read().unwrap();
        let mut paths = Vec::new();
        let mut stack: Vec<(String, Vec<Relation>)> = vec![(from_id.to_string(), Vec::new())];
        while let Some((node, path)) = stack.pop() {
            if path.len() >= max_depth {
                continue;
            }
            for relation in edges.get(&node).into_iter().flatten() {
                // No revisiting within one path.
                if relation.target_id == from_id
                    || path.iter().any(|r| r.target_id == relation.target_id)
                {
                    continue;
                }
                let mut next = path.clone();
                next.push(relation.clone());
                if relation.target_id == to_id {
                    paths.push(next);
                } else {
                    stack.push((relation.target_id.clone(), next));
                }
            }
        }
        Ok(paths)
    }

    async fn related_entities(
        &self,
        id: &str,
        max_depth: usize,
        limit: usize,
    ) -> NoesisResult<Vec<KnowledgeEntity>> {
        if self.fail_related.load(Ordering::SeqCst) {
            return Err(Self::graph_err("injected traversal failure").into());
        }
        let edges = self.edges.read().unwrap();
        let nodes = self.nodes.read().unwrap();
        let mut seen: HashSet<String> = HashSet::from([id.to_string()]);
        let mut queue: VecDeque<(String, usize)> = VecDeque::from([(id.to_string(), 0)]);
        let mut found = Vec::new();
        while let Some((node, depth)) = queue.pop_front() {
            if depth >= max_depth || found.len() >= limit {
                continue;
            }
            for relation in edges.get(&node).into_iter().flatten() {
                if seen.insert(relation.target_id.clone()) {
                    if let Some(entity) = nodes.get(&relation.target_id) {
                        found.push(entity.clone());
                        if found.len() >= limit {
                            break;
                        }
                    }
                    queue.push_back((relation.target_id.clone(), depth + 1));
                }
            }
        }
        Ok(found)
    }
}
