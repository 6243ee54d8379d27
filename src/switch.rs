use std::any::Any;

use crate::{Arg, ArgSpec, Input, ParseError};

/// A flag without a value, `-v, --verbose`.
#[derive(Debug)]
pub struct SwitchArg {
    spec: ArgSpec,
    value: bool,
}

impl SwitchArg {
    pub fn new(long: impl Into<String>) -> SwitchArg {
        SwitchArg { spec: ArgSpec::switch(long), value: false }
    }

    builders!(labeled);

    pub fn is_set(&self) -> bool {
        self.value
    }
}

impl Arg for SwitchArg {
    arg_accessors!();

    fn consume(&mut self, input: Input<'_>) -> Result<usize, ParseError> {
        if !input.switch(&self.spec) {
            return Ok(0);
        }
        self.value = true;
        Ok(1)
    }

    fn reset(&mut self) {
        self.value = false;
    }
}

/// A flag that may be repeated and counts its occurrences, `-vvv`.
#[derive(Debug)]
pub struct MultiSwitchArg {
    spec: ArgSpec,
    count: u32,
}

impl MultiSwitchArg {
    pub fn new(long: impl Into<String>) -> MultiSwitchArg {
        let mut spec = ArgSpec::switch(long);
        spec.set_multiple(true);
        MultiSwitchArg { spec, count: 0 }
    }

    builders!(labeled);

    pub fn count(&self) -> u32 {
        self.count
    }
}

impl Arg for MultiSwitchArg {
    arg_accessors!();

    fn consume(&mut self, input: Input<'_>) -> Result<usize, ParseError> {
        if !input.switch(&self.spec) {
            return Ok(0);
        }
        self.count += 1;
        Ok(1)
    }

    fn reset(&mut self) {
        self.count = 0;
    }
}
