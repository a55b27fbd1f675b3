use dynasmrt::{dynasm, DynasmApi, AssemblyOffset, ExecutableBuffer, x64::Assembler};
use tracing::{debug, trace};

use crate::{call::Call, error::{Error, Result}};

/// Hand assembled glue, System V x86-64.
pub struct NativeFn {
    buf: ExecutableBuffer,
    offset: AssemblyOffset,
    size: usize
}

impl NativeFn {
    pub fn code(&self) -> &[u8] {
        &self.buf[self.offset.0..self.offset.0 + self.size]
    }

    pub fn call(&self) {
        let built_fn: extern "C" fn() = unsafe { std::mem::transmute(self.buf.ptr(self.offset)) };
        built_fn();
    }
}

pub fn assemble(calls: &[Call]) -> Result<NativeFn> {
    let mut ops = Assembler::new()?;
    let fn_offset = ops.offset();

    // keep rsp 16-byte aligned at every call
    dynasm!(ops
        ; sub rsp, 8
    );

    for call in calls {
        trace!(?call, "lower");
        match *call {
            Call::Int(x) | Call::Bool(x) => {
                dynasm!(ops
                    ; mov edi, x
                );
            }
            Call::Float(x) => {
                let bits = x.to_bits() as i64;
                dynasm!(ops
                    ; mov rax, QWORD bits
                    ; movq xmm0, rax
                );
            }
            Call::Char(c) => {
                let c = c as i8 as i32;
                dynasm!(ops
                    ; mov edi, c
                );
            }
        }
        let addr = call.builtin().address() as i64;
        dynasm!(ops
            ; mov rax, QWORD addr
            ; call rax
        );
    }

    dynasm!(ops
        ; add rsp, 8
        ; ret
    );

    let size = ops.offset().0 - fn_offset.0;
    let buf = ops.finalize().map_err(|_| Error::Finalize)?;
    debug!(calls = calls.len(), size, "assembled glue");

    Ok(NativeFn{buf, offset: fn_offset, size})
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn frame_setup() {
        let f = assemble(&[]).unwrap();
        // sub rsp / add rsp / ret
        assert_eq!(f.code().first(), Some(&0x48));
        assert_eq!(f.code().last(), Some(&0xC3));
        f.call();
    }

    #[test]
    fn grows_per_call() {
        let one = assemble(&[Call::Int(1)]).unwrap();
        let two = assemble(&[Call::Int(1), Call::Bool(0)]).unwrap();
        assert!(two.code().len() > one.code().len());
        assert_eq!(one.code().last(), Some(&0xC3));
    }
}
