use fvm::Vm;

/// Runs one line on a fresh machine and returns it for inspection.
pub fn run(line: &str) -> Vm {
    let mut vm = Vm::new();
    vm.execute(line).expect("line should execute");
    vm
}

/// Runs one line on a fresh machine and returns the resulting stack,
/// bottom to top.
pub fn run_stack(line: &str) -> Vec<f64> {
    run(line).stack().as_slice().to_vec()
}

/// Runs one line on a fresh machine, expecting it to fail.
pub fn run_err(line: &str) -> (Vm, fvm::VmError) {
    let mut vm = Vm::new();
    let err = vm.execute(line).expect_err("line should fail");
    (vm, err)
}
