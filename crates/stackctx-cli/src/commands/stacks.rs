//! Stacks command implementation

use stackctx_core::SharedProvisioningContext;

use crate::error::Result;

/// Print one stack name per line
pub fn run_stacks(context: &SharedProvisioningContext) -> Result<()> {
    for name in context.stacks() {
        println!("{name}");
    }
    Ok(())
}
