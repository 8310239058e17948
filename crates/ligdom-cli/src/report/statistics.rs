use super::{BindingKey, ScanTally};
use std::collections::HashMap;
use std::hash::Hash;
use std::io::{self, Write};

/// Counts equal items, keeping keys in first-seen order.
fn ordered_counts<K, I>(items: I) -> Vec<(K, usize)>
where
    K: Hash + Eq + Clone,
    I: IntoIterator<Item = K>,
{
    let mut index: HashMap<K, usize> = HashMap::new();
    let mut counts: Vec<(K, usize)> = Vec::new();
    for item in items {
        match index.get(&item) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(item.clone(), counts.len());
                counts.push((item, 1));
            }
        }
    }
    counts
}

/// Writes how often each domain family was annotated, most common first.
pub fn write_general_statistics<W: Write>(out: &mut W, tally: &ScanTally) -> io::Result<()> {
    let mut counts = ordered_counts(tally.domains.iter());
    counts.sort_by(|a, b| b.1.cmp(&a.1));

    for ((accession, domain_id), occurrences) in counts {
        writeln!(
            out,
            "Pfam accession: {:<15} Pfam ID: {:<23} Occurrences: {:<10}",
            accession, domain_id, occurrences
        )?;
    }
    Ok(())
}

/// Writes, per (domain family, ligand), the number of structures where the
/// ligand binds the domain and the mean number of bound ligand instances.
pub fn write_matched_statistics<W: Write>(out: &mut W, tally: &ScanTally) -> io::Result<()> {
    let detailed: HashMap<&BindingKey, usize> =
        ordered_counts(tally.detailed_bindings.iter()).into_iter().collect();

    let mut counts = ordered_counts(tally.bindings.iter());
    counts.sort_by_cached_key(|(key, _)| format!("{} {}", key.domain_id, key.ligand));

    for (key, occurrences) in counts {
        let instances = detailed.get(key).copied().unwrap_or(occurrences);
        let ratio = instances as f64 / occurrences as f64;
        writeln!(
            out,
            "Pfam accession: {:<15} Pfam ID: {:<23} Ligand name: {:<10} Occurrences: {:<10} Molecule/domain: {:<10.2}",
            key.accession, key.domain_id, key.ligand, occurrences, ratio
        )?;
    }
    Ok(())
}
