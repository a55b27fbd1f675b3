// based loosly on https://github.com/bytecodealliance/cranelift-jit-demo/blob/main/src/jit.rs

use std::collections::HashMap;

use cranelift::{prelude::*, codegen::Context};
use cranelift_jit::{JITBuilder, JITModule};
use cranelift_module::{FuncId, Linkage, Module};
use tracing::debug;

use crate::{builtin::{Builtin, BUILTINS}, call::Call, error::Result, types::Type};

type CType = Option<cranelift::prelude::Type>;

/// Compiled glue. The code lives as long as the `JIT` that produced it.
#[derive(Clone, Copy, Debug)]
pub struct Compiled {
    pub ptr: *const u8,
    pub size: usize,
}

pub struct JIT {
    module: JITModule,
    ctx: Context,
    builder_ctx: FunctionBuilderContext,
    imports: HashMap<Builtin, FuncId>,
    fn_count: usize
}

impl Compiled {
    pub fn code(&self) -> &[u8] {
        unsafe { std::slice::from_raw_parts(self.ptr, self.size) }
    }

    pub fn call(&self) {
        let glue = unsafe { std::mem::transmute::<_, extern "C" fn()>(self.ptr) };
        glue();
    }
}

impl JIT {
    pub fn new() -> Result<JIT> {
        let mut jit_builder = JITBuilder::new(cranelift_module::default_libcall_names())?;
        // resolve the print builtins by name, the same way a linker would
        for (name, (addr, _)) in BUILTINS.iter() {
            jit_builder.symbol(*name, *addr as *const u8);
        }
        let module = JITModule::new(jit_builder);

        let ctx = module.make_context();
        let builder_ctx = FunctionBuilderContext::new();

        Ok(Self{
            module,
            ctx,
            builder_ctx,
            imports: HashMap::new(),
            fn_count: 0
        })
    }

    /// Build an `extern "C" fn()` that performs each call in order.
    pub fn compile(&mut self, calls: &[Call]) -> Result<Compiled> {
        for call in calls {
            self.import(call.builtin())?;
        }

        let name = format!("glue_{}", self.fn_count);
        self.fn_count += 1;
        let fn_id = self.module.declare_function(&name, Linkage::Export, &self.ctx.func.signature)?;

        {
            let mut fn_builder = FunctionBuilder::new(&mut self.ctx.func, &mut self.builder_ctx);

            let entry_block = fn_builder.create_block();
            fn_builder.switch_to_block(entry_block);
            fn_builder.seal_block(entry_block);

            let mut func_refs = HashMap::new();
            for (builtin, id) in &self.imports {
                let func_ref = self.module.declare_func_in_func(*id, &mut fn_builder.func);
                func_refs.insert(*builtin, func_ref);
            }

            for call in calls {
                let arg = match *call {
                    Call::Int(x) | Call::Bool(x) => fn_builder.ins().iconst(types::I32, x as i64),
                    Call::Float(x) => fn_builder.ins().f64const(x),
                    Call::Char(c) => fn_builder.ins().iconst(types::I8, c as i8 as i64),
                };
                let func_ref = func_refs[&call.builtin()];
                fn_builder.ins().call(func_ref, &[arg]);
            }

            fn_builder.ins().return_(&[]);
            fn_builder.finalize();
        }

        let defined = self.module.define_function(fn_id, &mut self.ctx);
        // leave a clean context behind even when the definition fails
        self.module.clear_context(&mut self.ctx);
        let size = defined?.size as usize;

        self.module.finalize_definitions();

        let ptr = self.module.get_finalized_function(fn_id);
        debug!(name = %name, calls = calls.len(), size, "compiled glue");

        Ok(Compiled{ptr, size})
    }

    fn import(&mut self, builtin: Builtin) -> Result<FuncId> {
        if let Some(id) = self.imports.get(&builtin) {
            return Ok(*id);
        }

        let mut sig = self.module.make_signature();
        lower_sig(&builtin.signature(), &mut sig);

        let id = self.module.declare_function(builtin.name(), Linkage::Import, &sig)?;
        self.imports.insert(builtin, id);
        Ok(id)
    }
}

fn lower_sig(sig: &crate::types::Signature, out: &mut cranelift::codegen::ir::Signature) {
    for ty in &sig.inputs {
        if let Some(cty) = lower_type(*ty) {
            let param = AbiParam::new(cty);
            // C passes narrow ints widened to the register
            let param = if *ty == Type::Char { param.sext() } else { param };
            out.params.push(param);
        }
    }

    if let Some(cty) = lower_type(sig.output) {
        out.returns.push(AbiParam::new(cty));
    }
}

fn lower_type(ty: Type) -> CType {
    match ty {
        Type::Int | Type::Bool => Some(types::I32),
        Type::Float => Some(types::F64),
        Type::Char => Some(types::I8),
        Type::Void => None
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::error::Error;

    #[test]
    fn lowers_builtin_signatures() -> Result<()> {
        let mut jit = JIT::new()?;
        for b in Builtin::ALL {
            let mut sig = jit.module.make_signature();
            lower_sig(&b.signature(), &mut sig);
            assert_eq!(sig.params.len(), 1);
            assert!(sig.returns.is_empty());
            assert_eq!(Some(sig.params[0].value_type), lower_type(b.arg_type()));
        }
        // compiling twice reuses the imports and gets a fresh function name
        let a = jit.compile(&[Call::Int(1)])?;
        let b = jit.compile(&[Call::Int(1), Call::Float(2.0)])?;
        assert_ne!(a.ptr, b.ptr);
        assert_eq!(jit.imports.len(), 2);
        Ok(())
    }

    #[test]
    fn empty_glue_runs() -> Result<()> {
        let mut jit = JIT::new()?;
        let compiled = jit.compile(&[])?;
        assert!(compiled.size > 0);
        assert_eq!(compiled.code().len(), compiled.size);
        compiled.call();
        Ok(())
    }

    #[test]
    fn recovers_after_failed_definition() -> Result<()> {
        let mut jit = JIT::new()?;
        jit.compile(&[Call::Int(1)])?;

        // reusing the name makes the definition a duplicate
        jit.fn_count = 0;
        assert!(matches!(jit.compile(&[Call::Int(2)]), Err(Error::Module(_))));
        assert_eq!(jit.ctx.func.dfg.num_blocks(), 0);

        jit.fn_count = 2;
        let compiled = jit.compile(&[Call::Bool(0), Call::Char(b'a')])?;
        compiled.call();
        assert!(compiled.size > 0);
        Ok(())
    }
}
