use iced_x86::{Decoder,DecoderOptions,IntelFormatter,Formatter,Instruction};

/// Intel syntax listing of x86-64 code, one instruction per line.
pub fn disassemble(code: &[u8]) -> Vec<String> {

    let mut decoder = Decoder::new(64, code, DecoderOptions::NONE);
    decoder.set_ip(0x1000);

    let mut formatter = IntelFormatter::new();

    let mut instruction = Instruction::default();
    let mut output = String::new();
    let mut lines = Vec::new();
    while decoder.can_decode() {
        output.clear();
        decoder.decode_out(&mut instruction);
        formatter.format(&instruction, &mut output);
        lines.push(format!("  {:02x}  {}",instruction.ip(),output));
    }
    lines
}

#[cfg(test)]
mod test {
    use super::disassemble;

    #[test]
    fn call_sequence() {
        // mov edi,5 / mov rax,rax / call rax / ret
        let code = [0xBF, 0x05, 0x00, 0x00, 0x00, 0x48, 0x89, 0xC0, 0xFF, 0xD0, 0xC3];
        let lines = disassemble(&code);
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("  1000  mov edi,5"));
        assert!(lines[2].ends_with("call rax"));
        assert!(lines[3].ends_with("ret"));
    }
}
