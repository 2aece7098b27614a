use crate::constants::{FONT_GLYPH_SIZE, STACK_DEPTH};
use crate::error::{Error, Result};
use crate::instruction::Instruction;
use crate::interpreter::Interpreter;

impl Interpreter {
    /// Applies a decoded instruction.
    ///
    /// Instructions that don't set the pc themselves move it on by 2, or by 4 when they
    /// skip. Failed instructions change nothing.
    pub fn execute(&mut self, instruction: Instruction) -> Result<()> {
        use Instruction::*;

        match instruction {
            Clear => self.clr(),
            Return => self.rts()?,
            Jump { addr } => self.pc = addr,
            Call { addr } => self.call(addr)?,
            SkipIfEqual { x, kk } => self.skip_if(self.v[x as usize] == kk),
            SkipIfNotEqual { x, kk } => self.skip_if(self.v[x as usize] != kk),
            SkipIfRegistersEqual { x, y } => {
                self.skip_if(self.v[x as usize] == self.v[y as usize])
            }
            Load { x, kk } => self.set(x, kk),
            Add { x, kk } => self.set(x, self.v[x as usize].wrapping_add(kk)),
            Move { x, y } => self.set(x, self.v[y as usize]),
            Or { x, y } => self.set(x, self.v[x as usize] | self.v[y as usize]),
            And { x, y } => self.set(x, self.v[x as usize] & self.v[y as usize]),
            Xor { x, y } => self.set(x, self.v[x as usize] ^ self.v[y as usize]),
            AddRegisters { x, y } => self.addr(x, y),
            Sub { x, y } => self.sub(x, y),
            ShiftRight { x } => self.shr(x),
            SubReversed { x, y } => self.subn(x, y),
            ShiftLeft { x } => self.shl(x),
            SkipIfRegistersNotEqual { x, y } => {
                self.skip_if(self.v[x as usize] != self.v[y as usize])
            }
            LoadIndex { addr } => {
                self.i = addr;
                self.pc += 2;
            }
            JumpOffset { addr } => self.pc = addr + u16::from(self.v[0x0]),
            Random { x, kk } => self.rand(x, kk),
            Draw { x, y, n } => self.draw(x, y, n)?,
            SkipIfPressed { x } => self.skip_if(self.keypad.check_pressed(self.v[x as usize])),
            SkipIfNotPressed { x } => {
                self.skip_if(!self.keypad.check_pressed(self.v[x as usize]))
            }
            ReadDelay { x } => self.set(x, self.delay_timer),
            WaitForKey { x } => self.keyd(x),
            SetDelay { x } => {
                self.delay_timer = self.v[x as usize];
                self.pc += 2;
            }
            SetSound { x } => {
                self.sound_timer = self.v[x as usize];
                self.pc += 2;
            }
            AddIndex { x } => {
                self.i = self.i.wrapping_add(u16::from(self.v[x as usize]));
                self.pc += 2;
            }
            LoadGlyph { x } => {
                self.i = u16::from(self.v[x as usize]) * FONT_GLYPH_SIZE;
                self.pc += 2;
            }
            StoreBcd { x } => self.bcd(x)?,
            StoreRegisters { x } => self.stor(x)?,
            LoadRegisters { x } => self.read(x)?,
        }
        Ok(())
    }

    /// Vx = value
    fn set(&mut self, x: u8, value: u8) {
        self.v[x as usize] = value;
        self.pc += 2;
    }

    /// pc += 2, and 2 more if `condition` holds
    fn skip_if(&mut self, condition: bool) {
        self.pc += if condition { 4 } else { 2 };
    }

    /// VF = flag, then Vx = value
    ///
    /// The result is written last, so when x is F the result wins over the flag.
    fn set_with_flag(&mut self, x: u8, value: u8, flag: bool) {
        self.v[0xF] = flag as u8;
        self.v[x as usize] = value;
        self.pc += 2;
    }

    /// clear
    fn clr(&mut self) {
        self.frame_buffer.clear();
        self.request_render();
        self.pc += 2;
    }

    /// PC = STACK.pop() + 2
    fn rts(&mut self) -> Result<()> {
        if self.sp == 0 {
            return Err(Error::StackUnderflow { pc: self.pc });
        }
        self.pc = self.stack[self.sp as usize] + 2;
        self.sp -= 1;
        Ok(())
    }

    /// STACK.push(PC); PC = addr
    /// The pushed address is the call itself, `rts` steps over it.
    fn call(&mut self, addr: u16) -> Result<()> {
        let sp = self.sp as usize + 1;
        if sp >= STACK_DEPTH {
            return Err(Error::StackOverflow { pc: self.pc });
        }
        self.sp = sp as u8;
        self.stack[sp] = self.pc;
        self.pc = addr;
        Ok(())
    }

    /// Vx += Vy; VF = carry
    fn addr(&mut self, x: u8, y: u8) {
        let (sum, carry) = self.v[x as usize].overflowing_add(self.v[y as usize]);
        self.set_with_flag(x, sum, carry);
    }

    /// Vx -= Vy; VF = Vx > Vy
    /// Equal operands clear VF even though nothing is borrowed.
    fn sub(&mut self, x: u8, y: u8) {
        let (vx, vy) = (self.v[x as usize], self.v[y as usize]);
        self.set_with_flag(x, vx.wrapping_sub(vy), vx > vy);
    }

    /// Vx = Vy - Vx; VF = Vy > Vx
    fn subn(&mut self, x: u8, y: u8) {
        let (vx, vy) = (self.v[x as usize], self.v[y as usize]);
        self.set_with_flag(x, vy.wrapping_sub(vx), vy > vx);
    }

    /// Vx /= 2; VF = the bit shifted out
    fn shr(&mut self, x: u8) {
        let vx = self.v[x as usize];
        self.set_with_flag(x, vx >> 1, vx & 0x01 == 0x01);
    }

    /// Vx *= 2; VF = the bit shifted out
    fn shl(&mut self, x: u8) {
        let vx = self.v[x as usize];
        self.set_with_flag(x, vx << 1, vx & 0x80 != 0);
    }

    /// Vx = kk + rand_byte
    /// Adds rather than masks, wrapping on overflow.
    fn rand(&mut self, x: u8, kk: u8) {
        let byte = self.random.random_byte();
        self.set(x, kk.wrapping_add(byte));
    }

    /// draw_sprite(x=Vx y=Vy size=n)
    /// XORs the n byte sprite at I onto the frame buffer at Vx, Vy.
    /// Sets VF if any pixels were erased, and asks for the frame to be shown.
    fn draw(&mut self, x: u8, y: u8, n: u8) -> Result<()> {
        let sprite = self.span(self.i, n as usize)?;
        let collision = self.frame_buffer.write_sprite(
            &self.memory[sprite],
            self.v[x as usize],
            self.v[y as usize],
        );
        self.v[0xF] = collision as u8;
        self.request_render();
        self.pc += 2;
        Ok(())
    }

    /// Vx = key
    /// Without a key the pc stays put, so this runs again next step.
    fn keyd(&mut self, x: u8) {
        if let Some(key) = self.keys.fetch_key(&self.keypad) {
            self.set(x, key);
        }
    }

    /// mem[I..I+3] = bcd(Vx)
    /// Store BCD repr of Vx in memory starting at address i
    fn bcd(&mut self, x: u8) -> Result<()> {
        let span = self.span(self.i, 3)?;
        let vx = self.v[x as usize];
        self.memory[span].copy_from_slice(&[vx / 100, (vx / 10) % 10, (vx % 100) % 10]);
        self.pc += 2;
        Ok(())
    }

    /// mem[I..=I+x] = V0..=Vx
    fn stor(&mut self, x: u8) -> Result<()> {
        let span = self.span(self.i, x as usize + 1)?;
        self.memory[span].copy_from_slice(&self.v[..=x as usize]);
        self.pc += 2;
        Ok(())
    }

    /// V0..=Vx = mem[I..=I+x]
    fn read(&mut self, x: u8) -> Result<()> {
        let span = self.span(self.i, x as usize + 1)?;
        self.v[..=x as usize].copy_from_slice(&self.memory[span]);
        self.pc += 2;
        Ok(())
    }
}
