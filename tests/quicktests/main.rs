use quickcheck::{Arbitrary, Gen};
use roster::{Key, Record, Score};

mod properties;
mod scenarios;

/// An enum for the various kinds of "things" to do to
/// the tree in a quicktest.
#[derive(Clone, Debug)]
pub enum Op {
    /// Insert the record under the key
    Insert(Key, Record),
    /// Remove the key from the tree
    Remove(Key),
}

/// Newtype so quickcheck can generate records from outside the crate.
#[derive(Clone, Debug)]
pub struct ArbRecord(pub Record);

impl Arbitrary for ArbRecord {
    fn arbitrary(g: &mut Gen) -> Self {
        let tenths = u8::arbitrary(g) % 101;
        let score = Score::new(f64::from(tenths) / 10.0).unwrap();
        ArbRecord(Record::new(String::arbitrary(g), score))
    }
}

impl Arbitrary for Op {
    /// Tells quickcheck how to randomly choose an operation
    fn arbitrary(g: &mut Gen) -> Self {
        let key = Key::from(u8::arbitrary(g));
        match g.choose(&[0, 1]).unwrap() {
            0 => Op::Insert(key, ArbRecord::arbitrary(g).0),
            1 => Op::Remove(key),
            _ => unreachable!(),
        }
    }
}
