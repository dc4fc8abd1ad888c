use simplelog::{Config, LevelFilter, TestLogger};
use tree::{Map, Set, Stack, Vector};

const KEYS: [i32; 15] = [4, 13, 0, -9, 2, -12, -4, 1, 3, 11, 60, 5, 12, 40, 80];

fn init_logging() {
    let _ = TestLogger::init(LevelFilter::Trace, Config::default());
}

#[test]
fn set_insert_in_order() {
    init_logging();

    let mut set = Set::new();
    for &key in &KEYS { assert!(set.insert(key).1); }

    assert_eq!(set.iter().cloned().collect::<Vec<_>>(),
               [-12, -9, -4, 0, 1, 2, 3, 4, 5, 11, 12, 13, 40, 60, 80]);
    assert_eq!(set.len(), KEYS.len());
}

#[test]
fn set_erase_in_order() {
    init_logging();

    let mut set: Set<i32> = KEYS.iter().cloned().collect();
    for key in &[0, -4, -9, 13, 1, 11, 60, 40, 5, 2] { assert!(set.remove(key)); }

    assert_eq!(set.iter().cloned().collect::<Vec<_>>(), [-12, 3, 4, 12, 80]);
    assert_eq!(set.first(), Some(&-12));
    assert_eq!(set.last(), Some(&80));
}

#[test]
fn map_mirrors_set() {
    init_logging();

    let mut map = Map::new();
    for &key in &KEYS { map.insert(key, key * 10); }
    for key in &[0, -4, -9, 13, 1, 11, 60, 40, 5, 2] { assert!(map.remove(key).is_some()); }

    let mut cursor = map.rbegin();
    let mut walked = vec![];

    while let Some(&(k, v)) = cursor.get() {
        walked.push((k, v));
        cursor.move_next();
    }

    assert_eq!(walked, [(80, 800), (12, 120), (4, 40), (3, 30), (-12, -120)]);
    assert!(map.at(&13).is_err());
    assert_eq!(map[&12], 120);
}

#[test]
fn vector_inserts_grow_by_doubling() {
    init_logging();

    let mut vec = Vector::from_elem(4, 3);
    assert_eq!(vec.capacity(), 3);

    vec.push_back(3);
    assert_eq!(vec.capacity(), 6);

    vec.insert(1, 12);
    vec.insert(0, 21);

    assert_eq!(*vec, [21, 4, 12, 4, 4, 3]);
    assert_eq!(vec.len(), 6);
    assert_eq!(vec.capacity(), 6);

    vec.push_back(7);
    assert_eq!(vec.capacity(), 12);
}

#[test]
fn stack_over_vector() {
    init_logging();

    let mut stack = Stack::new();
    stack.push(1);
    stack.push(2);
    stack.push(3);

    assert_eq!(stack.top(), Some(&3));
    stack.pop();
    assert_eq!(stack.top(), Some(&2));
    assert_eq!(stack.len(), 2);
}
