#![no_main]
use arbitrary::Arbitrary;
use dynstr::DynString;
use libfuzzer_sys::fuzz_target;

/// One step of the differential run. Payload slices borrow from the fuzzer
/// input, so growing them is the mutator's job, not the allocator's.
#[derive(Arbitrary, Debug)]
enum Op<'a> {
    Assign(&'a [u8]),
    Append(&'a [u8]),
    Prepend(&'a [u8]),
    Push(u8),
    Clear,
    Cut { start: usize, count: usize },
    Reserve(u16),
    Fit,
    WriteNumber { number: u64, width: u8 },
    CloneCheck,
}

fn invariants(s: &DynString, model: &[u8]) {
    assert_eq!(s.as_bytes(), model);
    assert_eq!(s.len(), model.len());
    assert!(s.capacity() > s.len());
    assert_eq!(s.as_bytes_with_nul()[s.len()], 0);
}

fn run(ops: &[Op<'_>]) {
    let mut s = DynString::new().unwrap();
    let mut model: Vec<u8> = Vec::new();

    for op in ops {
        match *op {
            Op::Assign(bytes) => {
                s.assign(bytes).unwrap();
                model.clear();
                model.extend_from_slice(bytes);
            }
            Op::Append(bytes) => {
                s.append(bytes).unwrap();
                model.extend_from_slice(bytes);
            }
            Op::Prepend(bytes) => {
                s.prepend(bytes).unwrap();
                let mut joined = bytes.to_vec();
                joined.extend_from_slice(&model);
                model = joined;
            }
            Op::Push(byte) => {
                s.push(byte).unwrap();
                model.push(byte);
            }
            Op::Clear => {
                s.clear();
                model.clear();
            }
            Op::Cut { start, count } => {
                let in_range = start
                    .checked_add(count)
                    .is_some_and(|end| end <= model.len());
                let res = s.cut(start, count);
                assert_eq!(res.is_ok(), in_range);
                if in_range {
                    model = model[start..start + count].to_vec();
                }
            }
            Op::Reserve(n) => {
                let n = usize::from(n);
                s.reserve(n).unwrap();
                assert!(s.capacity() >= n);
            }
            Op::Fit => {
                s.fit().unwrap();
                assert_eq!(s.capacity(), model.len() + 1);
            }
            Op::WriteNumber { number, width } => {
                let width = usize::from(width);
                let rendered = format!("{number:>width$}");
                let required = s
                    .write_truncated(format_args!("{number:>width$}"))
                    .unwrap();
                assert_eq!(required, rendered.len());

                let stored = rendered.len().min(s.capacity() - 1);
                model.clear();
                model.extend_from_slice(&rendered.as_bytes()[..stored]);
            }
            Op::CloneCheck => {
                let copy = s.try_clone().unwrap();
                assert_eq!(copy, s);
                assert_eq!(copy.capacity(), copy.len() + 1);
            }
        }
        invariants(&s, &model);
    }
}

fuzz_target!(|ops: Vec<Op<'_>>| run(&ops));
