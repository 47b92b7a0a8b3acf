//! Best-image selection across named size classes

/// YouTube thumbnail names, best first
pub const YOUTUBE_THUMBNAILS: &[&str] = &["sddefault", "hqdefault", "mqdefault", "default"];

/// Last.fm album art sizes, best first
pub const LASTFM_SIZES: &[&str] = &["mega", "extralarge", "large", "medium", "small"];

/// Pick the URL of the best-ranked size class present in `candidates`.
///
/// `candidates` yields `(size_name, url)` pairs; names not in `priority` are
/// ignored. Within the winning class the first candidate is kept, so the
/// result never mixes classes and does not depend on candidates of lower
/// classes.
pub fn best_image<'a, I>(candidates: I, priority: &[&str]) -> Option<&'a str>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut best: Option<(usize, &'a str)> = None;

    for (name, url) in candidates {
        if url.is_empty() {
            continue;
        }
        let rank = match priority.iter().position(|p| *p == name) {
            Some(rank) => rank,
            None => continue,
        };
        match best {
            Some((best_rank, _)) if best_rank <= rank => {}
            _ => best = Some((rank, url)),
        }
        if rank == 0 {
            break;
        }
    }

    best.map(|(_, url)| url)
}
