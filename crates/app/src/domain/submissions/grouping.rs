//! Distributor grouping.

use rustc_hash::FxHashMap;

use crate::domain::submissions::data::CartLine;

/// Distributor used for lines that name none.
pub const DEFAULT_DISTRIBUTOR: &str = "ep";

/// Lines fulfilled by one distributor.
#[derive(Debug, Clone, PartialEq)]
pub struct DistributorGroup {
    pub distributor: String,
    pub lines: Vec<CartLine>,
}

/// Partition lines by distributor, in order of first appearance.
#[must_use]
pub fn partition_by_distributor(lines: Vec<CartLine>) -> Vec<DistributorGroup> {
    let mut groups: Vec<DistributorGroup> = Vec::new();
    let mut positions: FxHashMap<String, usize> = FxHashMap::default();

    for line in lines {
        let distributor = line
            .distributor
            .as_deref()
            .filter(|code| !code.is_empty())
            .unwrap_or(DEFAULT_DISTRIBUTOR)
            .to_string();

        if let Some(group) = positions
            .get(&distributor)
            .and_then(|&position| groups.get_mut(position))
        {
            group.lines.push(line);
            continue;
        }

        positions.insert(distributor.clone(), groups.len());
        groups.push(DistributorGroup {
            distributor,
            lines: vec![line],
        });
    }

    groups
}

#[cfg(test)]
mod tests {
    use crate::domain::numbers::LooseValue;

    use super::*;

    fn line(distributor: Option<&str>, product: i64) -> CartLine {
        CartLine {
            product_id: LooseValue::Integer(product),
            distributor: distributor.map(str::to_string),
            ..CartLine::default()
        }
    }

    #[test]
    fn groups_keep_first_appearance_order() {
        let groups = partition_by_distributor(vec![
            line(Some("B"), 1),
            line(Some("A"), 2),
            line(Some("B"), 3),
        ]);

        let order: Vec<&str> = groups.iter().map(|g| g.distributor.as_str()).collect();

        assert_eq!(order, ["B", "A"]);
        assert_eq!(groups.first().map(|g| g.lines.len()), Some(2));
    }

    #[test]
    fn missing_or_empty_distributor_uses_default() {
        let groups = partition_by_distributor(vec![line(None, 1), line(Some(""), 2)]);

        assert_eq!(groups.len(), 1);
        assert_eq!(
            groups.first().map(|g| g.distributor.as_str()),
            Some(DEFAULT_DISTRIBUTOR)
        );
    }

    #[test]
    fn every_line_lands_in_its_own_group() {
        let groups = partition_by_distributor(vec![
            line(Some("A"), 1),
            line(Some("B"), 2),
            line(Some("A"), 3),
            line(Some("B"), 4),
        ]);

        for group in &groups {
            assert!(
                group
                    .lines
                    .iter()
                    .all(|l| l.distributor.as_deref() == Some(group.distributor.as_str())),
                "line filed under the wrong distributor"
            );
        }

        assert_eq!(groups.iter().map(|g| g.lines.len()).sum::<usize>(), 4);
    }

    #[test]
    fn empty_cart_has_no_groups() {
        assert!(partition_by_distributor(Vec::new()).is_empty());
    }
}
