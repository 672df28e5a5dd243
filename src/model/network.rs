//! Topological growth predictor over COBRA-JSON models.
//!
//! Growth is predicted by network expansion: starting from the compounds the
//! medium supplies through exchange reactions, every reaction whose
//! substrates are all available (in a direction its bounds allow, with its
//! gene rule satisfied) makes its products available. The model grows when
//! every reactant of the objective reaction becomes available.

use crate::data::{model_gene_id, CompoundSet};
use crate::error::{BenchError, Result};
use crate::model::gpr::Gpr;
use crate::model::GrowthModel;
use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fs;
use std::path::Path;

const EXCHANGE_PREFIXES: [&str; 2] = ["EX_", "R_EX_"];

#[derive(Deserialize)]
struct JsonModel {
    #[serde(default)]
    id: Option<String>,
    metabolites: Vec<JsonMetabolite>,
    reactions: Vec<JsonReaction>,
    #[serde(default)]
    genes: Vec<JsonGene>,
}

#[derive(Deserialize)]
struct JsonMetabolite {
    id: String,
}

#[derive(Deserialize)]
struct JsonReaction {
    id: String,
    metabolites: BTreeMap<String, f64>,
    #[serde(default = "default_lower_bound")]
    lower_bound: f64,
    #[serde(default = "default_upper_bound")]
    upper_bound: f64,
    #[serde(default)]
    gene_reaction_rule: String,
    #[serde(default)]
    objective_coefficient: f64,
}

#[derive(Deserialize)]
struct JsonGene {
    id: String,
}

fn default_lower_bound() -> f64 {
    -1000.0
}

fn default_upper_bound() -> f64 {
    1000.0
}

#[derive(Debug, Clone)]
struct Reaction {
    id: String,
    /// (metabolite index, stoichiometric coefficient)
    stoichiometry: Vec<(usize, f64)>,
    lower_bound: f64,
    upper_bound: f64,
    gpr: Option<Gpr>,
}

impl Reaction {
    fn forward_allowed(&self) -> bool {
        self.upper_bound > 0.0
    }

    fn reverse_allowed(&self) -> bool {
        self.lower_bound < 0.0
    }
}

/// Exchange reaction supplying one external compound.
#[derive(Debug, Clone)]
struct Exchange {
    reaction: usize,
    metabolite: usize,
    /// Coefficient of the metabolite; uptake runs against its sign.
    coefficient: f64,
}

/// A metabolic network evaluated topologically.
#[derive(Debug, Clone)]
pub struct NetworkModel {
    id: String,
    metabolites: Vec<String>,
    reactions: Vec<Reaction>,
    exchanges: HashMap<String, Vec<Exchange>>,
    exchange_reactions: BTreeSet<usize>,
    objective: Vec<usize>,
    objective_metabolites: Vec<usize>,
    genes: BTreeSet<String>,
    gene_reactions: HashMap<String, Vec<usize>>,
    wild_type_default: bool,
}

/// Strip the `M_` prefix and compartment suffix of an external metabolite id.
fn compound_id(metabolite: &str) -> &str {
    let id = metabolite.strip_prefix("M_").unwrap_or(metabolite);
    match id.rsplit_once('_') {
        Some((base, compartment)) if !base.is_empty() && compartment.len() <= 2 => base,
        _ => id,
    }
}

impl NetworkModel {
    /// Read a model in COBRA-JSON format.
    ///
    /// Gene ids are brought into the `G_`-prefixed id space used by
    /// essentiality data.
    pub fn read_json<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| {
            BenchError::Model(format!("unable to read {}: {}", path.display(), e))
        })?;
        let fallback_id = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self::from_json_str(&text, &fallback_id)
    }

    /// Parse a COBRA-JSON document.
    pub fn from_json_str(json: &str, fallback_id: &str) -> Result<Self> {
        let model: JsonModel = serde_json::from_str(json)?;
        Self::build(model, fallback_id)
    }

    fn build(model: JsonModel, fallback_id: &str) -> Result<Self> {
        let id = model.id.unwrap_or_else(|| fallback_id.to_string());

        let mut metabolites = Vec::with_capacity(model.metabolites.len());
        let mut met_index: HashMap<String, usize> = HashMap::new();
        for m in model.metabolites {
            met_index.insert(m.id.clone(), metabolites.len());
            metabolites.push(m.id);
        }

        let mut genes: BTreeSet<String> =
            model.genes.iter().map(|g| model_gene_id(&g.id)).collect();

        let mut reactions = Vec::with_capacity(model.reactions.len());
        let mut objective = Vec::new();
        for rxn in model.reactions {
            let mut stoichiometry = Vec::with_capacity(rxn.metabolites.len());
            for (met, coef) in &rxn.metabolites {
                let idx = *met_index.get(met).ok_or_else(|| {
                    BenchError::Model(format!(
                        "reaction '{}' references unknown metabolite '{}'",
                        rxn.id, met
                    ))
                })?;
                if *coef != 0.0 {
                    stoichiometry.push((idx, *coef));
                }
            }
            let gpr = Gpr::parse_with(&rxn.gene_reaction_rule, model_gene_id)?;
            if let Some(rule) = &gpr {
                rule.genes(&mut genes);
            }
            if rxn.objective_coefficient != 0.0 {
                objective.push(reactions.len());
            }
            reactions.push(Reaction {
                id: rxn.id,
                stoichiometry,
                lower_bound: rxn.lower_bound,
                upper_bound: rxn.upper_bound,
                gpr,
            });
        }

        if objective.is_empty() {
            return Err(BenchError::Model(format!("model '{}' has no objective", id)));
        }

        let objective_metabolites: Vec<usize> = objective
            .iter()
            .flat_map(|&r| reactions[r].stoichiometry.iter())
            .filter(|(_, coef)| *coef < 0.0)
            .map(|(idx, _)| *idx)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let mut exchanges: HashMap<String, Vec<Exchange>> = HashMap::new();
        let mut exchange_reactions = BTreeSet::new();
        for (r, rxn) in reactions.iter().enumerate() {
            let is_exchange = EXCHANGE_PREFIXES.iter().any(|p| rxn.id.starts_with(p));
            if !is_exchange || rxn.stoichiometry.len() != 1 {
                continue;
            }
            let (metabolite, coefficient) = rxn.stoichiometry[0];
            let compound = compound_id(&metabolites[metabolite]).to_string();
            exchanges.entry(compound).or_default().push(Exchange {
                reaction: r,
                metabolite,
                coefficient,
            });
            exchange_reactions.insert(r);
        }

        let mut gene_reactions: HashMap<String, Vec<usize>> = HashMap::new();
        for (r, rxn) in reactions.iter().enumerate() {
            if let Some(rule) = &rxn.gpr {
                let mut mentioned = BTreeSet::new();
                rule.genes(&mut mentioned);
                for gene in mentioned {
                    gene_reactions.entry(gene).or_default().push(r);
                }
            }
        }

        let mut model = Self {
            id,
            metabolites,
            reactions,
            exchanges,
            exchange_reactions,
            objective,
            objective_metabolites,
            genes,
            gene_reactions,
            wild_type_default: false,
        };
        model.wild_type_default = model.expand(None, None);
        log::debug!(
            "Loaded model '{}': {} reactions, {} metabolites, {} genes, {} exchanged compounds",
            model.id,
            model.reactions.len(),
            model.metabolites.len(),
            model.genes.len(),
            model.exchanges.len()
        );
        Ok(model)
    }

    /// Compounds the model can exchange with its environment.
    pub fn exchanged_compounds(&self) -> impl Iterator<Item = &str> {
        self.exchanges.keys().map(String::as_str)
    }

    /// Run network expansion and report whether every objective reactant is
    /// reachable.
    fn expand(&self, medium: Option<&CompoundSet>, deleted: Option<&str>) -> bool {
        let functional = |g: &str| Some(g) != deleted;
        let active: Vec<bool> = self
            .reactions
            .iter()
            .map(|r| r.gpr.as_ref().map_or(true, |rule| rule.is_active(&functional)))
            .collect();

        if self.objective.iter().any(|&r| !active[r]) {
            return false;
        }

        let mut available = vec![false; self.metabolites.len()];
        for (compound, exchanges) in &self.exchanges {
            for ex in exchanges {
                if !active[ex.reaction] {
                    continue;
                }
                let rxn = &self.reactions[ex.reaction];
                let supplied = match medium {
                    Some(m) => m.contains(compound),
                    None if ex.coefficient < 0.0 => rxn.reverse_allowed(),
                    None => rxn.forward_allowed(),
                };
                if supplied {
                    available[ex.metabolite] = true;
                }
            }
        }

        let mut fired = vec![(false, false); self.reactions.len()];
        let mut changed = true;
        while changed {
            changed = false;
            for (r, rxn) in self.reactions.iter().enumerate() {
                if !active[r] || self.exchange_reactions.contains(&r) {
                    continue;
                }
                if !fired[r].0
                    && rxn.forward_allowed()
                    && rxn
                        .stoichiometry
                        .iter()
                        .all(|&(m, c)| c > 0.0 || available[m])
                {
                    fired[r].0 = true;
                    for &(m, c) in &rxn.stoichiometry {
                        if c > 0.0 && !available[m] {
                            available[m] = true;
                            changed = true;
                        }
                    }
                }
                if !fired[r].1
                    && rxn.reverse_allowed()
                    && rxn
                        .stoichiometry
                        .iter()
                        .all(|&(m, c)| c < 0.0 || available[m])
                {
                    fired[r].1 = true;
                    for &(m, c) in &rxn.stoichiometry {
                        if c < 0.0 && !available[m] {
                            available[m] = true;
                            changed = true;
                        }
                    }
                }
            }
        }

        self.objective_metabolites.iter().all(|&m| available[m])
    }
}

impl GrowthModel for NetworkModel {
    fn id(&self) -> &str {
        &self.id
    }

    fn genes(&self) -> &BTreeSet<String> {
        &self.genes
    }

    fn grows(&self, medium: Option<&CompoundSet>) -> Result<bool> {
        match medium {
            None => Ok(self.wild_type_default),
            Some(m) => Ok(self.expand(Some(m), None)),
        }
    }

    fn grows_without(&self, gene: &str, medium: Option<&CompoundSet>) -> Result<bool> {
        if !self.genes.contains(gene) {
            return Err(BenchError::Prediction(format!(
                "gene '{}' not in model '{}'",
                gene, self.id
            )));
        }
        // Genes without reactions cannot change the phenotype.
        if !self.gene_reactions.contains_key(gene) {
            return self.grows(medium);
        }
        Ok(self.expand(medium, Some(gene)))
    }
}
