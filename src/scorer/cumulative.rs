use crate::stats::Running;

/// Running speed statistics of qualifying trials up to and including a row.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CumulativeRt {
    pub average: Option<f64>,
    pub sd: Option<f64>,
    pub se: Option<f64>,
}

/// Folds `(qualifies, rt)` rows, already in presentation order, into one
/// [`CumulativeRt`] per row. Non-qualifying rows repeat the previous values.
pub fn running_rt<I>(rows: I) -> Vec<CumulativeRt>
where
    I: IntoIterator<Item = (bool, f64)>,
{
    rows.into_iter()
        .scan(Running::default(), |acc, (qualifies, rt)| {
            if qualifies {
                acc.push(rt);
            }
            let s = acc.stats();
            Some(CumulativeRt {
                average: s.mean,
                sd: s.sd,
                se: s.se(),
            })
        })
        .collect()
}
