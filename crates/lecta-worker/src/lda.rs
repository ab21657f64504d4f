//! Latent Dirichlet Allocation over a single transcript.
//!
//! A small collapsed Gibbs sampler: the transcript is tokenized into
//! lowercased alphabetic words of three or more characters, stopwords
//! are dropped, and token-topic assignments are resampled for a fixed
//! number of sweeps. The sampler is seeded so a given transcript always
//! yields the same topics.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use regex::Regex;
use tracing::debug;

/// Number of topics extracted per transcript.
const NUM_TOPICS: usize = 3;

/// Gibbs sweeps over the token assignments.
const PASSES: usize = 10;

/// Terms reported per topic.
const TOP_WORDS: usize = 5;

/// Dirichlet prior on the document-topic distribution.
const ALPHA: f64 = 0.1;

/// Dirichlet prior on the topic-word distributions.
const BETA: f64 = 0.01;

const SEED: u64 = 7;

static WORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[a-zA-Z]{3,}\b").expect("valid regex"));

static STOPWORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "about", "above", "after", "again", "against", "all", "and", "any", "are", "because",
        "been", "before", "being", "below", "between", "both", "but", "can", "did", "does",
        "doing", "down", "during", "each", "few", "for", "from", "further", "had", "has", "have",
        "having", "her", "here", "hers", "herself", "him", "himself", "his", "how", "into", "its",
        "itself", "just", "more", "most", "myself", "nor", "not", "now", "off", "once", "only",
        "other", "our", "ours", "ourselves", "out", "over", "own", "same", "she", "should",
        "some", "such", "than", "that", "the", "their", "theirs", "them", "themselves", "then",
        "there", "these", "they", "this", "those", "through", "too", "under", "until", "very",
        "was", "were", "what", "when", "where", "which", "while", "who", "whom", "why", "will",
        "with", "you", "your", "yours", "yourself", "yourselves",
    ]
    .into_iter()
    .collect()
});

/// Extract formatted LDA topics from a transcript.
///
/// Returns formatted strings (`Topic 1: 0.052*"word" + ...`), or a
/// single placeholder entry when the transcript has no usable tokens.
pub fn lda_topics(transcript: &str) -> Vec<String> {
    let tokens = tokenize(transcript);
    if tokens.is_empty() {
        debug!("No valid tokens for LDA after filtering");
        return vec!["No topics generated (short transcript).".to_string()];
    }

    let (vocab, token_ids) = build_vocab(&tokens);
    let topic_word = sample_topics(&token_ids, vocab.len());

    format_topics(&vocab, &topic_word)
}

fn tokenize(text: &str) -> Vec<String> {
    WORD_RE
        .find_iter(text)
        .map(|m| m.as_str().to_lowercase())
        .filter(|w| !STOPWORDS.contains(w.as_str()))
        .collect()
}

/// Map tokens to dense word ids.
fn build_vocab(tokens: &[String]) -> (Vec<String>, Vec<usize>) {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut vocab = Vec::new();
    let mut token_ids = Vec::with_capacity(tokens.len());

    for token in tokens {
        let id = *index.entry(token.as_str()).or_insert_with(|| {
            vocab.push(token.clone());
            vocab.len() - 1
        });
        token_ids.push(id);
    }

    (vocab, token_ids)
}

/// Collapsed Gibbs sampling over token-topic assignments.
///
/// Returns per-topic word counts.
fn sample_topics(token_ids: &[usize], vocab_size: usize) -> Vec<Vec<u32>> {
    let mut rng = StdRng::seed_from_u64(SEED);

    let mut topic_word = vec![vec![0u32; vocab_size]; NUM_TOPICS];
    let mut topic_totals = vec![0u32; NUM_TOPICS];
    let mut doc_topic = vec![0u32; NUM_TOPICS];
    let mut assignments = Vec::with_capacity(token_ids.len());

    for &word in token_ids {
        let topic = rng.random_range(0..NUM_TOPICS);
        topic_word[topic][word] += 1;
        topic_totals[topic] += 1;
        doc_topic[topic] += 1;
        assignments.push(topic);
    }

    let v_beta = vocab_size as f64 * BETA;
    let mut weights = vec![0f64; NUM_TOPICS];

    for _ in 0..PASSES {
        for (i, &word) in token_ids.iter().enumerate() {
            let old = assignments[i];
            topic_word[old][word] -= 1;
            topic_totals[old] -= 1;
            doc_topic[old] -= 1;

            let mut total = 0.0;
            for k in 0..NUM_TOPICS {
                let w = (doc_topic[k] as f64 + ALPHA)
                    * (topic_word[k][word] as f64 + BETA)
                    / (topic_totals[k] as f64 + v_beta);
                weights[k] = w;
                total += w;
            }

            let mut draw = rng.random::<f64>() * total;
            let mut new = NUM_TOPICS - 1;
            for (k, &w) in weights.iter().enumerate() {
                if draw < w {
                    new = k;
                    break;
                }
                draw -= w;
            }

            topic_word[new][word] += 1;
            topic_totals[new] += 1;
            doc_topic[new] += 1;
            assignments[i] = new;
        }
    }

    topic_word
}

/// Render topics as `Topic N: weight*"word" + ...` strings.
fn format_topics(vocab: &[String], topic_word: &[Vec<u32>]) -> Vec<String> {
    topic_word
        .iter()
        .enumerate()
        .map(|(idx, counts)| {
            let total: u32 = counts.iter().sum();
            let v_beta = vocab.len() as f64 * BETA;

            let mut ranked: Vec<(usize, u32)> = counts
                .iter()
                .copied()
                .enumerate()
                .filter(|&(_, c)| c > 0)
                .collect();
            // Count desc, then word asc so ties are stable
            ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| vocab[a.0].cmp(&vocab[b.0])));

            let terms: Vec<String> = ranked
                .into_iter()
                .take(TOP_WORDS)
                .map(|(word, count)| {
                    let weight = (count as f64 + BETA) / (total as f64 + v_beta);
                    format!("{:.3}*\"{}\"", weight, vocab[word])
                })
                .collect();

            format!("Topic {}: {}", idx + 1, terms.join(" + "))
        })
        .collect()
}
