//! Run-scoped LZW dictionaries.
//!
//! Phrases are never stored whole.  Each entry links back to the code of the
//! phrase it extends and holds the one symbol doing the extending, so that adding
//! an entry costs the same no matter how long the phrase is.
//!
//! Both sides preload the alphabet, code `i` is the phrase made of symbol `i`.
//! New codes start at `FIRST_PHRASE_CODE` and go up by one per insertion.

use std::collections::HashMap;
use crate::{ALPHABET_SIZE,FIRST_PHRASE_CODE};

/// Dictionary element, used as the key during encoding.
/// `prefix` is the code of the phrase minus its last symbol, and is
/// `None` for the preloaded single symbol phrases.
#[derive(Clone,Copy,Debug,PartialEq,Eq,Hash)]
pub struct Link {
    pub prefix: Option<usize>,
    pub sym: u8
}

impl Link {
    pub fn root(sym: u8) -> Self {
        Self {
            prefix: None,
            sym
        }
    }
    pub fn create(prefix: usize, sym: u8) -> Self {
        Self {
            prefix: Some(prefix),
            sym
        }
    }
}

/// Encoding side, `{prefix,sym}` maps to the code of the extended phrase.
pub struct PhraseIndex {
    map: HashMap<Link,usize>,
    next: usize
}

impl PhraseIndex {
    pub fn create() -> Self {
        let mut map = HashMap::with_capacity(2*ALPHABET_SIZE);
        for sym in 0..=u8::MAX {
            map.insert(Link::root(sym),sym as usize);
        }
        Self {
            map,
            next: FIRST_PHRASE_CODE
        }
    }
    pub fn get(&self,key: &Link) -> Option<usize> {
        self.map.get(key).copied()
    }
    /// Bind `key` to the next available code and return the code
    pub fn insert(&mut self,key: Link) -> usize {
        let code = self.next;
        self.map.insert(key,code);
        self.next += 1;
        code
    }
    pub fn next_code(&self) -> usize {
        self.next
    }
    pub fn len(&self) -> usize {
        self.map.len()
    }
}

#[derive(Clone,Copy)]
struct Entry {
    link: Link,
    /// length of the phrase, so it can be filled in from the back
    len: usize
}

/// Decoding side, indexed by code.
pub struct PhraseTable {
    entries: Vec<Entry>
}

impl PhraseTable {
    pub fn create() -> Self {
        let entries = (0..=u8::MAX).map(|sym| Entry {
            link: Link::root(sym),
            len: 1
        }).collect();
        Self {
            entries
        }
    }
    /// Walk back through the links to form the phrase for `code`.
    pub fn get_string(&self,code: usize) -> Option<Vec<u8>> {
        let entry = self.entries.get(code)?;
        let mut ans = vec![0;entry.len];
        let mut curr = *entry;
        for i in (0..ans.len()).rev() {
            ans[i] = curr.link.sym;
            if let Some(prefix) = curr.link.prefix {
                curr = self.entries[prefix];
            }
        }
        Some(ans)
    }
    /// Bind the phrase `prefix` + `sym` to the next available code and return the code.
    /// The caller has to make sure `prefix` is already bound.
    pub fn insert(&mut self,prefix: usize,sym: u8) -> usize {
        let base = self.entries[prefix];
        self.entries.push(Entry {
            link: Link::create(prefix,sym),
            len: base.len + 1
        });
        self.entries.len() - 1
    }
    pub fn next_code(&self) -> usize {
        self.entries.len()
    }
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

#[test]
fn preloaded_alphabet() {
    let index = PhraseIndex::create();
    let table = PhraseTable::create();
    assert_eq!(index.len(),ALPHABET_SIZE);
    assert_eq!(table.len(),ALPHABET_SIZE);
    assert_eq!(index.get(&Link::root(b'a')),Some(97));
    assert_eq!(table.get_string(97),Some(vec![b'a']));
    assert_eq!(index.next_code(),FIRST_PHRASE_CODE);
    assert_eq!(table.next_code(),FIRST_PHRASE_CODE);
}

#[test]
fn linked_phrases() {
    let mut table = PhraseTable::create();
    let ab = table.insert(b'a' as usize,b'b');
    let abc = table.insert(ab,b'c');
    assert_eq!((ab,abc),(256,257));
    assert_eq!(table.get_string(abc),Some(b"abc".to_vec()));
    let bc = table.insert(b'b' as usize,b'c');
    let abca = table.insert(abc,b'a');
    assert_eq!(table.get_string(bc),Some(b"bc".to_vec()));
    assert_eq!(table.get_string(abca),Some(b"abca".to_vec()));
    assert_eq!(table.next_code(),260);
    assert_eq!(table.get_string(260),None);
}

#[test]
fn index_codes_increase() {
    let mut index = PhraseIndex::create();
    let ab = index.insert(Link::create(b'a' as usize,b'b'));
    let abb = index.insert(Link::create(ab,b'b'));
    assert_eq!((ab,abb),(256,257));
    assert_eq!(index.get(&Link::create(ab,b'b')),Some(257));
    assert_eq!(index.get(&Link::create(abb,b'b')),None);
    assert_eq!(index.len(),258);
}
