use std::collections::BTreeMap;

use crate::analysis_context::AnalysisContext;
use crate::match_loader::Participant;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SideResolution {
    pub side: String,
    // Other sides that collected as many roster votes as the winner
    pub tied_with: Vec<String>,
}

impl SideResolution {
    pub fn is_ambiguous(&self) -> bool {
        !self.tied_with.is_empty()
    }
}

/*
    Majority vote over the sides of every roster identity present in the match. A tie is settled
    in favour of the lexicographically smallest side identifier, which does not depend on the order
    participants appear in the file. The caller gets the tie back so it can be reported.
    Returns None when no roster identity with a side played in the match.
*/
pub fn resolve_side(participants: &[Participant], context: &AnalysisContext) -> Option<SideResolution> {
    let mut votes: BTreeMap<&str, usize> = BTreeMap::new();
    for p in participants {
        if !context.is_tracked(&p.name) { continue; }
        let Some(side) = p.side.as_deref() else { continue; };
        *votes.entry(side).or_default() += 1;
    }

    let most = *votes.values().max()?;
    let mut leaders = votes.into_iter().filter(|(_, n)| *n == most).map(|(side, _)| side.to_string());

    // BTreeMap iteration is ordered, so the first leader is the smallest identifier
    let side = leaders.next()?;
    Some(SideResolution {
        side,
        tied_with: leaders.collect(),
    })
}
