use crate::clipper::scanbeam::Scanbeam;

fn drain(scanbeam: &mut Scanbeam) -> Vec<i64> {
    let mut result = Vec::new();
    while let Some(y) = scanbeam.pop() {
        result.push(y);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pops_largest_first() {
        let mut scanbeam = Scanbeam::new();

        for y in [10, -5, 30, 0, 20] {
            scanbeam.insert(y);
        }

        assert_eq!(drain(&mut scanbeam), vec![30, 20, 10, 0, -5]);
        assert!(scanbeam.is_empty());
    }

    #[test]
    fn test_duplicates_pop_once() {
        let mut scanbeam = Scanbeam::new();

        scanbeam.insert(7);
        scanbeam.insert(7);
        scanbeam.insert(3);
        scanbeam.insert(7);
        assert_eq!(scanbeam.len(), 4);

        assert_eq!(scanbeam.pop(), Some(7));
        assert_eq!(scanbeam.len(), 1);
        assert_eq!(scanbeam.pop(), Some(3));
        assert_eq!(scanbeam.pop(), None);
    }

    #[test]
    fn test_insert_after_pop() {
        let mut scanbeam = Scanbeam::new();

        scanbeam.insert(100);
        scanbeam.insert(50);
        assert_eq!(scanbeam.pop(), Some(100));

        // the sweep keeps adding edge tops while it runs
        scanbeam.insert(80);
        scanbeam.insert(50);
        assert_eq!(drain(&mut scanbeam), vec![80, 50]);
    }

    #[test]
    fn test_pop_empty() {
        let mut scanbeam = Scanbeam::default();

        assert_eq!(scanbeam.pop(), None);
        assert!(scanbeam.is_empty());
    }

    #[test]
    fn test_clean() {
        let mut scanbeam = Scanbeam::new();

        for y in 0..100 {
            scanbeam.insert(y % 10);
        }
        assert!(!scanbeam.is_empty());

        scanbeam.clean();
        assert!(scanbeam.is_empty());
        assert_eq!(scanbeam.pop(), None);
    }

    #[test]
    fn test_extreme_values() {
        let mut scanbeam = Scanbeam::new();

        scanbeam.insert(i64::MAX >> 2);
        scanbeam.insert(-(i64::MAX >> 2));

        assert_eq!(drain(&mut scanbeam), vec![i64::MAX >> 2, -(i64::MAX >> 2)]);
    }
}
