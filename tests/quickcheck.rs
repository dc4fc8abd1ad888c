#![cfg(feature = "quickcheck")]

use tree::{Map, Position};

/// Returns the key at index `index % map.len()`, or `None` if the map is empty.
fn nth_key(map: &Map<u8, u16>, index: usize) -> Option<u8> {
    if map.is_empty() { return None; }
    map.iter().nth(index % map.len()).map(|(k, _)| *k)
}

/// Returns every key with the position of its entry.
fn positions(map: &Map<u8, u16>) -> Vec<(u8, Position)> {
    let mut cursor = map.begin();
    let mut out = vec![];

    while let Some(&(k, _)) = cursor.get() {
        out.push((k, cursor.position()));
        cursor.move_next();
    }

    out
}

fn key_at(map: &Map<u8, u16>, pos: Position) -> Option<u8> { map.cursor(pos).get().map(|e| e.0) }

fn entries(map: &Map<u8, u16>) -> Vec<(u8, u16)> { map.iter().map(|(k, v)| (*k, *v)).collect() }

mod insert {
    use quickcheck::quickcheck;
    use tree::map::Entry;
    use tree::Map;

    #[test]
    fn never_overwrites() {
        fn test(mut map: Map<u8, u16>, key: u8, value: u16) -> bool {
            let old = map.get(&key).cloned();
            let old_len = map.len();
            let (pos, inserted) = map.insert(key, value);

            inserted == old.is_none() &&
            super::key_at(&map, pos) == Some(key) &&
            map.get(&key) == Some(&old.unwrap_or(value)) &&
            map.len() == old_len + inserted as usize
        }

        quickcheck(test as fn(Map<u8, u16>, u8, u16) -> bool);
    }

    #[test]
    fn existing_position_is_returned() {
        fn test(mut map: Map<u8, u16>, index: usize, value: u16) -> bool {
            let key = match super::nth_key(&map, index) { Some(key) => key, None => return true };
            let before = map.find(&key).position();

            map.insert(key, value) == (before, false)
        }

        quickcheck(test as fn(Map<u8, u16>, usize, u16) -> bool);
    }

    #[test]
    fn insert_or_assign_overwrites() {
        fn test(mut map: Map<u8, u16>, key: u8, value: u16) -> bool {
            let old = map.get(&key).cloned();
            let mut expected = super::entries(&map);
            expected.retain(|e| e.0 != key);

            let returned = map.insert_or_assign(key, value);
            let mut after = super::entries(&map);
            after.retain(|e| e.0 != key);

            returned == old && map.get(&key) == Some(&value) && after == expected
        }

        quickcheck(test as fn(Map<u8, u16>, u8, u16) -> bool);
    }

    #[test]
    fn entry_agrees_with_insert() {
        fn test(map: Map<u8, u16>, key: u8, value: u16) -> bool {
            let had = map.contains_key(&key);

            let mut by_insert = map.clone();
            by_insert.insert(key, value);

            let mut by_entry = map;
            let occupied = match by_entry.entry(key) {
                Entry::Occupied(_) => true,
                Entry::Vacant(e) => { e.insert(value); false }
            };

            occupied == had && by_entry == by_insert
        }

        quickcheck(test as fn(Map<u8, u16>, u8, u16) -> bool);
    }

    #[test]
    fn hint_agrees_with_insert() {
        fn test(map: Map<u8, u16>, hint: usize, key: u8, value: u16) -> bool {
            let mut plain = map.clone();
            plain.insert(key, value);

            let mut hinted = map;
            let hint = match super::nth_key(&hinted, hint) {
                Some(near) if hint % 4 != 0 => hinted.find(&near).position(),
                _ => hinted.end().position(),
            };

            let pos = hinted.insert_hint(hint, key, value);
            super::key_at(&hinted, pos) == Some(key) && hinted == plain
        }

        quickcheck(test as fn(Map<u8, u16>, usize, u8, u16) -> bool);
    }
}

mod erase_at {
    use quickcheck::quickcheck;
    use tree::Map;

    #[test]
    fn returns_successor() {
        fn test(mut map: Map<u8, u16>, index: usize) -> bool {
            let key = match super::nth_key(&map, index) { Some(key) => key, None => return true };
            let succ = map.succ(&key, false).map(|(k, v)| (*k, *v));
            let old_len = map.len();

            let pos = map.find(&key).position();
            let ((erased, _), next) = map.erase_at(pos);

            erased == key &&
            map.cursor(next).get().cloned() == succ &&
            map.len() == old_len - 1 &&
            !map.contains_key(&key)
        }

        quickcheck(test as fn(Map<u8, u16>, usize) -> bool);
    }

    #[test]
    fn chained_erase_drains_in_order() {
        fn test(mut map: Map<u8, u16>) -> bool {
            let expected = super::entries(&map);
            let mut drained = vec![];
            let mut pos = map.begin().position();

            while !pos.is_end() {
                let (entry, next) = map.erase_at(pos);
                drained.push(entry);
                pos = next;
            }

            map.is_empty() && drained == expected
        }

        quickcheck(test as fn(Map<u8, u16>) -> bool);
    }
}

mod positions {
    use quickcheck::quickcheck;
    use tree::Map;

    #[test]
    fn survive_inserts() {
        fn test(mut map: Map<u8, u16>, extra: Vec<(u8, u16)>) -> bool {
            let before = super::positions(&map);
            for (k, v) in extra { map.insert(k, v); }

            before.iter().all(|&(k, pos)| super::key_at(&map, pos) == Some(k))
        }

        quickcheck(test as fn(Map<u8, u16>, Vec<(u8, u16)>) -> bool);
    }

    #[test]
    fn survive_unrelated_removal() {
        fn test(mut map: Map<u8, u16>, index: usize) -> bool {
            let key = match super::nth_key(&map, index) { Some(key) => key, None => return true };

            // a removed node with two children takes over its predecessor's entry
            let pred = map.pred(&key, false).map(|(k, _)| *k);
            let before = super::positions(&map);
            map.remove(&key);

            before.iter()
                .filter(|&&(k, _)| k != key && Some(k) != pred)
                .all(|&(k, pos)| super::key_at(&map, pos) == Some(k))
        }

        quickcheck(test as fn(Map<u8, u16>, usize) -> bool);
    }
}

mod cursor {
    use quickcheck::quickcheck;
    use tree::Map;

    #[test]
    fn reverse_walk_agrees_with_rev_iter() {
        fn test(map: Map<u8, u16>) -> bool {
            let mut cursor = map.rbegin();
            let mut walked = vec![];

            while let Some(&entry) = cursor.get() {
                walked.push(entry);
                cursor.move_next();
            }

            cursor == map.rend() &&
            walked == map.iter().rev().map(|(k, v)| (*k, *v)).collect::<Vec<_>>()
        }

        quickcheck(test as fn(Map<u8, u16>) -> bool);
    }

    #[test]
    fn end_wraps_around() {
        fn test(map: Map<u8, u16>) -> bool {
            let mut forward = map.end();
            forward.move_next();

            let mut backward = map.end();
            backward.move_prev();

            forward == map.begin() &&
            backward.get().map(|e| (&e.0, &e.1)) == map.last() &&
            map.rbegin().get().map(|e| (&e.0, &e.1)) == map.last()
        }

        quickcheck(test as fn(Map<u8, u16>) -> bool);
    }

    #[test]
    fn bounds_agree_with_scan() {
        fn test(map: Map<u8, u16>, key: u8) -> bool {
            let (lo, hi) = map.equal_range(&key);

            lo.get().map(|e| e.0) == map.iter().map(|(k, _)| *k).find(|k| *k >= key) &&
            hi.get().map(|e| e.0) == map.iter().map(|(k, _)| *k).find(|k| *k > key) &&
            (lo == hi) == !map.contains_key(&key) &&
            map.find(&key).is_end() == !map.contains_key(&key)
        }

        quickcheck(test as fn(Map<u8, u16>, u8) -> bool);
    }
}

mod extrema {
    use quickcheck::quickcheck;
    use tree::Map;

    #[test]
    fn pops_drain_both_ends() {
        fn test(mut map: Map<u8, u16>, from_front: Vec<bool>) -> bool {
            let mut expected = super::entries(&map);

            for front in from_front {
                let (popped, model) = if front {
                    let model = if expected.is_empty() { None } else { Some(expected.remove(0)) };
                    (map.pop_first(), model)
                } else {
                    (map.pop_last(), expected.pop())
                };

                if popped != model { return false; }
            }

            super::entries(&map) == expected
        }

        quickcheck(test as fn(Map<u8, u16>, Vec<bool>) -> bool);
    }

    #[test]
    fn pred_and_succ_agree_with_scan() {
        fn test(map: Map<u8, u16>, key: u8, inclusive: bool) -> bool {
            let pred = map.iter().rev().find(|e| if inclusive { *e.0 <= key } else { *e.0 < key });
            let succ = map.iter().find(|e| if inclusive { *e.0 >= key } else { *e.0 > key });

            map.pred(&key, inclusive) == pred && map.succ(&key, inclusive) == succ
        }

        quickcheck(test as fn(Map<u8, u16>, u8, bool) -> bool);
    }
}

mod range {
    use quickcheck::{Arbitrary, Gen, quickcheck};
    use std::ops::Bound::{self, Excluded, Included, Unbounded};
    use tree::Map;

    #[derive(Clone, Debug)]
    struct Interval(Bound<u8>, Bound<u8>);

    fn bound(gen: &mut Gen) -> Bound<u8> {
        match u8::arbitrary(gen) % 3 {
            0 => Included(u8::arbitrary(gen)),
            1 => Excluded(u8::arbitrary(gen)),
            _ => Unbounded,
        }
    }

    impl Arbitrary for Interval {
        fn arbitrary(gen: &mut Gen) -> Self { Interval(bound(gen), bound(gen)) }
    }

    impl Interval {
        fn contains(&self, key: u8) -> bool {
            let above = match self.0 { Included(t) => key >= t, Excluded(t) => key > t, _ => true };
            let below = match self.1 { Included(t) => key <= t, Excluded(t) => key < t, _ => true };
            above && below
        }

        fn as_ref(&self) -> (Bound<&u8>, Bound<&u8>) { (self.0.as_ref(), self.1.as_ref()) }
    }

    #[test]
    fn agrees_with_filter() {
        fn test(map: Map<u8, u16>, interval: Interval) -> bool {
            let (min, max) = interval.as_ref();
            let expected: Vec<_> = map.iter().filter(|e| interval.contains(*e.0)).collect();

            map.range(min, max).collect::<Vec<_>>() == expected &&
            map.range(min, max).rev().collect::<Vec<_>>() ==
                expected.iter().rev().cloned().collect::<Vec<_>>()
        }

        quickcheck(test as fn(Map<u8, u16>, Interval) -> bool);
    }

    #[test]
    fn range_mut_touches_only_the_interval() {
        fn test(mut map: Map<u8, u16>, interval: Interval) -> bool {
            let old = map.clone();
            let (min, max) = interval.as_ref();

            for (_, value) in map.range_mut(min, max).rev() { *value = value.wrapping_add(1); }

            map.len() == old.len() && map.iter().zip(old.iter()).all(|(now, then)| {
                let inside = interval.contains(*now.0);
                let bumped = if inside { then.1.wrapping_add(1) } else { *then.1 };
                now.0 == then.0 && *now.1 == bumped
            })
        }

        quickcheck(test as fn(Map<u8, u16>, Interval) -> bool);
    }
}
