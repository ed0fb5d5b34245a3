//! Persona optimizer: bootstrap few-shot demos and random search over demo sets.
//!
//! Flow: zero-shot pass over the trainset (candidate 0) → labeled-only
//!       candidate (1) → for each random candidate, shuffle the trainset, take
//!       metric-accepted zero-shot outputs as demos and fill the open slots
//!       with labeled examples → evaluate every candidate on the trainset →
//!       keep the best.
//!
//! Candidate 0 is always the zero-shot writer, so the search never does worse
//! than no demos at all. Model failures propagate; nothing is retried here.

use std::collections::HashMap;
use std::sync::Arc;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::{info, warn};

use crate::config::OptimizerConfig;
use crate::generation::writer::{FewShotWriter, PostWriter};
use crate::generation::GenerationError;
use crate::llm_client::LanguageModel;
use crate::models::training::TrainingExample;
use crate::scoring::StyleMetric;

/// Where one demo in a candidate prompt comes from. Indices point into the
/// trainset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DemoSource {
    /// The zero-shot writer's output for this example, accepted by the metric.
    Bootstrapped(usize),
    /// The example as written, hand-labeled post included.
    Labeled(usize),
}

/// Score of one evaluated candidate.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateScore {
    pub candidate: usize,
    /// Demo sources in prompt order.
    pub demos: Vec<DemoSource>,
    /// Average metric value over the trainset, 0 – 100.
    pub score: f64,
}

#[derive(Debug, Clone, Default)]
pub struct OptimizationReport {
    pub trainset_size: usize,
    pub candidates: Vec<CandidateScore>,
    pub best_candidate: usize,
    pub best_score: f64,
}

/// The tuned writer plus how it was chosen.
pub struct Optimized {
    pub writer: FewShotWriter,
    pub report: OptimizationReport,
}

/// Zero-shot output for one trainset example.
struct Trace {
    post: String,
    accepted: bool,
}

pub struct PersonaOptimizer {
    model: Arc<dyn LanguageModel>,
    metric: Arc<dyn StyleMetric>,
    config: OptimizerConfig,
}

impl PersonaOptimizer {
    pub fn new(
        model: Arc<dyn LanguageModel>,
        metric: Arc<dyn StyleMetric>,
        config: OptimizerConfig,
    ) -> Self {
        Self {
            model,
            metric,
            config,
        }
    }

    /// Runs the search and returns the best-scoring writer.
    ///
    /// An empty trainset is not an error: the untuned zero-shot writer comes
    /// back with a score of 0.
    pub async fn compile(&self, trainset: &[TrainingExample]) -> Result<Optimized, GenerationError> {
        info!(
            "Starting optimization: trainset={} posts, max_demos={}, random candidates={}, metric={}",
            trainset.len(),
            self.config.max_demos,
            self.config.num_candidates,
            self.metric.name()
        );

        let zero_shot = FewShotWriter::zero_shot(self.model.clone());

        if trainset.is_empty() {
            warn!("Empty trainset; using the untuned zero-shot writer");
            return Ok(Optimized {
                writer: zero_shot,
                report: OptimizationReport::default(),
            });
        }

        // Zero-shot pass doubles as candidate 0 and as the bootstrap traces.
        let mut traces = Vec::with_capacity(trainset.len());
        let mut total = 0.0;
        for example in trainset {
            let post = zero_shot.write(&example.request()).await?;
            let result = self.metric.evaluate(example, &post);
            total += result.as_f64();
            traces.push(Trace {
                post,
                accepted: result.accepted(),
            });
        }
        let zero_shot_score = percent(total, trainset.len());
        let accepted = traces.iter().filter(|t| t.accepted).count();
        info!("Candidate 0 (zero-shot): score {zero_shot_score:.1}, {accepted} traces accepted");

        let mut report = OptimizationReport {
            trainset_size: trainset.len(),
            candidates: vec![CandidateScore {
                candidate: 0,
                demos: Vec::new(),
                score: zero_shot_score,
            }],
            best_candidate: 0,
            best_score: zero_shot_score,
        };
        let mut best_writer = zero_shot;

        let mut seen: HashMap<Vec<DemoSource>, f64> = HashMap::new();
        seen.insert(Vec::new(), zero_shot_score);

        let labeled_only: Vec<DemoSource> = (0..trainset.len().min(self.config.max_demos))
            .map(DemoSource::Labeled)
            .collect();
        let mut candidates = vec![(1, labeled_only)];
        candidates.extend(
            (2..self.config.num_candidates + 2).map(|c| (c, self.sample_demos(c, &traces))),
        );

        for (candidate, demos) in candidates {
            let score = match seen.get(&demos) {
                Some(&score) => {
                    info!("Candidate {candidate}: same demos as an earlier candidate, score {score:.1}");
                    score
                }
                None => {
                    let writer = self.writer_for(&demos, trainset, &traces);
                    let score = self.evaluate(&writer, trainset).await?;
                    info!(
                        "Candidate {candidate}: {} demos ({} labeled), score {score:.1}",
                        demos.len(),
                        demos
                            .iter()
                            .filter(|d| matches!(d, DemoSource::Labeled(_)))
                            .count()
                    );
                    if score > report.best_score {
                        report.best_candidate = candidate;
                        report.best_score = score;
                        best_writer = writer;
                    }
                    seen.insert(demos.clone(), score);
                    score
                }
            };

            report.candidates.push(CandidateScore {
                candidate,
                demos,
                score,
            });
        }

        info!(
            "Optimization complete: best candidate {} with {} demos, score {:.1}",
            report.best_candidate,
            best_writer.demos().len(),
            report.best_score
        );

        Ok(Optimized {
            writer: best_writer,
            report,
        })
    }

    /// Walks a seeded shuffle of the trainset: accepted traces first, then
    /// labeled examples for the slots still open.
    fn sample_demos(&self, candidate: usize, traces: &[Trace]) -> Vec<DemoSource> {
        let mut order: Vec<usize> = (0..traces.len()).collect();
        let mut rng = StdRng::seed_from_u64(self.config.seed.wrapping_add(candidate as u64));
        order.shuffle(&mut rng);

        let mut demos: Vec<DemoSource> = order
            .iter()
            .copied()
            .filter(|&idx| traces[idx].accepted)
            .take(self.config.max_demos)
            .map(DemoSource::Bootstrapped)
            .collect();
        let open = self.config.max_demos - demos.len();
        demos.extend(
            order
                .into_iter()
                .filter(|&idx| !traces[idx].accepted)
                .take(open)
                .map(DemoSource::Labeled),
        );
        demos
    }

    fn writer_for(
        &self,
        demos: &[DemoSource],
        trainset: &[TrainingExample],
        traces: &[Trace],
    ) -> FewShotWriter {
        let demos = demos
            .iter()
            .map(|&source| match source {
                DemoSource::Bootstrapped(idx) => {
                    TrainingExample::from_request(&trainset[idx].request(), traces[idx].post.clone())
                }
                DemoSource::Labeled(idx) => trainset[idx].clone(),
            })
            .collect();
        FewShotWriter::with_demos(self.model.clone(), demos)
    }

    async fn evaluate(
        &self,
        writer: &FewShotWriter,
        trainset: &[TrainingExample],
    ) -> Result<f64, GenerationError> {
        let mut total = 0.0;
        for example in trainset {
            let post = writer.write(&example.request()).await?;
            total += self.metric.evaluate(example, &post).as_f64();
        }
        Ok(percent(total, trainset.len()))
    }
}

fn percent(total: f64, n: usize) -> f64 {
    if n == 0 {
        0.0
    } else {
        total / n as f64 * 100.0
    }
}
