//! # Triage model artifacts (`model`)
//!
//! The decision engine treats feature extraction and scoring as external
//! collaborators. This crate defines those seams ([`Vectorizer`],
//! [`ScoreProducer`], [`LabelTable`]), the data passed across them
//! ([`FeatureVector`], [`ScoreVector`]) and JSON-backed implementations of a
//! TF-IDF vectorizer, a one-vs-rest linear classifier and a label encoder.
//!
//! [`ModelContext`] bundles one of each into an immutable, shareable object;
//! [`ArtifactState`] records whether loading it succeeded.
//!
//! ```no_run
//! use model::{ArtifactState, ScoreProducer, Vectorizer};
//!
//! let state = ArtifactState::initialize("artifacts");
//! if let Some(ctx) = state.context() {
//!     let features = ctx.vectorizer().transform("itching skin rash").unwrap();
//!     let scores = ctx.scorer().decision_scores(&features).unwrap();
//!     println!("{:?}", scores.as_slice());
//! }
//! ```

mod artifact;
mod context;
mod error;
mod features;
mod labels;
mod linear;
mod tfidf;
mod traits;

pub use crate::artifact::{CLASSIFIER_FILE, LABELS_FILE, VECTORIZER_FILE};
pub use crate::context::{ArtifactState, ModelContext};
pub use crate::error::ModelError;
pub use crate::features::{FeatureVector, ScoreVector};
pub use crate::labels::LabelEncoder;
pub use crate::linear::LinearClassifier;
pub use crate::tfidf::{Norm, TfidfVectorizer};
pub use crate::traits::{LabelTable, ScoreProducer, Vectorizer};
