use std::cell::RefCell;
use std::io::Write;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use log::info;

use crate::dict::{Dict, Key};
use crate::errors::DivideByZero;
use crate::protect::protect;
use crate::sequence::{index, slice};
use crate::source::read_source;
use crate::steps::{Step, STEPS};
use crate::value::Value;

/// The file this runner is compiled from. Printed by the `files` step
pub const SOURCE_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/", file!());

/// `(start, stop, step)` for each extraction the `slicing` step prints
const SLICES: [(Option<isize>, Option<isize>, Option<isize>); 5] = [
    (Some(2), Some(6), None),
    (Some(7), None, None),
    (None, Some(7), None),
    (None, None, Some(2)),
    (Some(2), Some(8), Some(3)),
];

fn print(sink: &mut dyn Write, val: &Value) -> Result<()> {
    match writeln!(sink, "{}", val) {
        Ok(_) => Ok(()),
        Err(e) => bail!("Failed to write output: {}", e),
    }
}

pub struct Runner<'a> {
    sink: &'a mut dyn Write,
    source: PathBuf,
}

impl<'a> Runner<'a> {
    /// Create a new `Runner` instance
    ///
    /// `sink` is where every printed value is written
    pub fn new(sink: &'a mut dyn Write) -> Self {
        Self {
            sink,
            source: PathBuf::from(SOURCE_PATH),
        }
    }

    /// Run every step in order, stopping at the first unrecovered failure
    pub fn run(&mut self) -> Result<()> {
        for step in &*STEPS {
            info!("Running step '{}'", step);
            self.run_step(*step)
                .with_context(|| format!("Step '{}' failed", step))?;
        }

        Ok(())
    }

    fn run_step(&mut self, step: Step) -> Result<()> {
        match step {
            Step::None => self.print(&Value::None),
            Step::Exceptions => self.exceptions(),
            Step::Files => self.files(),
            Step::Dictionaries => self.dictionaries(),
            Step::Tuples => self.tuples(),
            Step::Slicing => self.slicing(),
            Step::Comprehensions => self.comprehensions(),
        }
    }

    fn print(&mut self, val: &Value) -> Result<()> {
        print(self.sink, val)
    }

    fn exceptions(&mut self) -> Result<()> {
        // All three blocks write to the sink, so share it through a `RefCell`
        let sink = RefCell::new(&mut *self.sink);

        let outcome = protect::<DivideByZero, _, _, _, _>(
            || {
                print(&mut **sink.borrow_mut(), &Value::from("Hello"))?;
                let quot = Value::Integer(1).divide(&Value::Integer(0))?;
                print(&mut **sink.borrow_mut(), &quot)
            },
            |_| print(&mut **sink.borrow_mut(), &Value::from("Divided by zero")),
            || {
                print(
                    &mut **sink.borrow_mut(),
                    &Value::from("This code will run no matter what"),
                )
            },
        )?;
        info!("Protected region finished: {:?}", outcome);

        Ok(())
    }

    fn files(&mut self) -> Result<()> {
        let contents = read_source(&self.source)?;
        self.print(&Value::String(contents))
    }

    fn dictionaries(&mut self) -> Result<()> {
        let mut pairs = Dict::new();
        pairs.insert(Key::Integer(1), "apple");
        pairs.insert(
            "orange",
            Value::List(vec![
                Value::Integer(2),
                Value::Integer(3),
                Value::Integer(4),
            ]),
        );
        pairs.insert(true, false);
        pairs.insert(Key::None, "True");
        info!("Built mapping with {} keys: {}", pairs.len(), pairs);

        self.print(&Value::from(pairs.contains(&Key::Integer(1))))?;
        self.print(&Value::from(!pairs.contains(&Key::Integer(4))))?;
        self.print(pairs.get(&Key::Integer(1)).unwrap_or(&Value::None))?;
        self.print(pairs.get(&Key::from("orange")).unwrap_or(&Value::None))?;
        self.print(&pairs.get_or(&Key::Integer(12345), Value::from("not in dictionary")))
    }

    fn tuples(&mut self) -> Result<()> {
        let words = Value::tuple(vec!["spam", "eggs", "sausages"]);
        self.print(index(words.as_vec()?, 0)?)?;

        let my_tuple = ("one", "two", "three");
        info!(
            "Grouped without parentheses: {}",
            Value::tuple(vec![my_tuple.0, my_tuple.1, my_tuple.2])
        );

        Ok(())
    }

    fn slicing(&mut self) -> Result<()> {
        let squares = Value::list(vec![0_i128, 1, 4, 9, 16, 25, 36, 49, 64, 81]);
        let seq = squares.as_vec()?;

        for (start, stop, step) in &SLICES {
            self.print(&Value::List(slice(seq, *start, *stop, *step)?))?;
        }

        Ok(())
    }

    fn comprehensions(&mut self) -> Result<()> {
        let cubes = Value::list((0..5_i128).map(|i| i.pow(3)));
        self.print(&cubes)?;

        let evens = Value::list((0..10_i128).map(|i| i.pow(2)).filter(|sq| sq % 2 == 0));
        self.print(&evens)
    }
}

#[cfg(test)]
fn expected_output() -> String {
    let mut out = String::new();

    out += "None\n";
    out += "Hello\nDivided by zero\nThis code will run no matter what\n";
    out += include_str!("runner.rs");
    out += "\n";
    out += "True\nTrue\napple\n[2, 3, 4]\nnot in dictionary\n";
    out += "spam\n";
    out += "[4, 9, 16, 25]\n[49, 64, 81]\n[0, 1, 4, 9, 16, 25, 36]\n[0, 4, 16, 36, 64]\n[4, 25]\n";
    out += "[0, 1, 8, 27, 64]\n[0, 4, 16, 36, 64]\n";

    out
}

#[test]
fn test_run() {
    let mut output = Vec::new();
    let mut runner = Runner::new(&mut output);
    runner.run().expect("run failed");

    assert_eq!(
        String::from_utf8(output).expect("Output not utf-8"),
        expected_output()
    );
}

#[test]
fn test_run_twice() {
    let mut first = Vec::new();
    Runner::new(&mut first).run().expect("first run failed");

    let mut second = Vec::new();
    Runner::new(&mut second).run().expect("second run failed");
    assert_eq!(first, second);

    let mut both = Vec::new();
    {
        let mut runner = Runner::new(&mut both);
        runner.run().expect("first run failed");
        runner.run().expect("second run failed");
    }
    assert_eq!(
        String::from_utf8(both).expect("Output not utf-8"),
        expected_output().repeat(2)
    );
}

#[test]
fn test_steps() {
    let tests = vec![
        (Step::None, "None\n"),
        (
            Step::Exceptions,
            "Hello\nDivided by zero\nThis code will run no matter what\n",
        ),
        (
            Step::Dictionaries,
            "True\nTrue\napple\n[2, 3, 4]\nnot in dictionary\n",
        ),
        (Step::Tuples, "spam\n"),
        (Step::Comprehensions, "[0, 1, 8, 27, 64]\n[0, 4, 16, 36, 64]\n"),
    ];

    for (step, expected) in tests {
        let mut output = Vec::new();
        let mut runner = Runner::new(&mut output);
        runner.run_step(step).expect("step failed");
        assert_eq!(
            String::from_utf8(output).expect("Output not utf-8"),
            expected
        );
    }
}

#[test]
fn test_missing_source_is_fatal() {
    let mut output = Vec::new();
    let err = {
        let mut runner = Runner::new(&mut output);
        runner.source = PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/src/missing.rs"));
        runner.run().unwrap_err()
    };

    assert_eq!(err.to_string(), "Step 'files' failed");
    let io_err = err
        .chain()
        .find_map(|e| e.downcast_ref::<std::io::Error>())
        .expect("no io::Error in chain");
    assert_eq!(io_err.kind(), std::io::ErrorKind::NotFound);

    // Output stops where the failing step began
    assert_eq!(
        String::from_utf8(output).expect("Output not utf-8"),
        "None\nHello\nDivided by zero\nThis code will run no matter what\n"
    );
}
