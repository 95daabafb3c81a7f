use socgen_core::cpu::{CV32E40X, Cpu, RawValue};
use socgen_core::soc::{
    BasePeripheralDomain, BusType, MemorySubsystem, Peripheral, RamRegion, System,
    UserPeripheralDomain,
};

/// Fluent construction of `System` fixtures.
///
/// `SystemBuilder::valid()` yields a configuration that passes validation; each
/// setter then breaks or changes one aspect of it.
pub struct SystemBuilder {
    bus: BusType,
    cpu: Option<Cpu>,
    memory: Option<MemorySubsystem>,
    base: Option<(u64, u64)>,
    user: Option<(u64, u64)>,
}

impl SystemBuilder {
    /// Nothing registered, single-master bus.
    pub fn empty() -> Self {
        Self {
            bus: BusType::OneToM,
            cpu: None,
            memory: None,
            base: None,
            user: None,
        }
    }

    /// CPU, 64 KiB of RAM, base domain at 0x20000, user domain right after it.
    pub fn valid() -> Self {
        let mut memory = MemorySubsystem::new();
        memory.add_region(RamRegion::new("ram0", 0x8000));
        memory.add_region(RamRegion::new("ram1", 0x8000));

        Self {
            bus: BusType::OneToM,
            cpu: Some(
                Cpu::new(&CV32E40X, [("x_ext", RawValue::from("0"))])
                    .expect("fixture CPU parameters are valid"),
            ),
            memory: Some(memory),
            base: Some((0x2_0000, 0x1_0000)),
            user: Some((0x3_0000, 0x1_0000)),
        }
    }

    pub fn bus(mut self, bus: BusType) -> Self {
        self.bus = bus;
        self
    }

    pub fn without_cpu(mut self) -> Self {
        self.cpu = None;
        self
    }

    pub fn without_memory(mut self) -> Self {
        self.memory = None;
        self
    }

    pub fn memory(mut self, memory: MemorySubsystem) -> Self {
        self.memory = Some(memory);
        self
    }

    pub fn interleaved_memory(self) -> Self {
        let mut memory = MemorySubsystem::new();
        memory.add_region(RamRegion::new("ram0", 0x8000));
        memory.add_region(RamRegion::interleaved("il0", 0x1_0000, 4));
        self.memory(memory)
    }

    pub fn base(mut self, start: u64, length: u64) -> Self {
        self.base = Some((start, length));
        self
    }

    pub fn user(mut self, start: u64, length: u64) -> Self {
        self.user = Some((start, length));
        self
    }

    pub fn without_domains(mut self) -> Self {
        self.base = None;
        self.user = None;
        self
    }

    pub fn build(self) -> System {
        let mut system = System::new(self.bus);
        if let Some(cpu) = self.cpu {
            system.set_cpu(cpu);
        }
        if let Some(memory) = self.memory {
            system.set_memory_ss(memory);
        }
        if let Some((start, length)) = self.base {
            let domain = BasePeripheralDomain::new(start, length)
                .expect("fixture base domain length is non-zero")
                .with_peripheral(Peripheral::new("soc_ctrl", 0x1000))
                .with_peripheral(Peripheral::new("uart", 0x1000));
            system
                .add_peripheral_domain(domain)
                .expect("base domain is recognised");
        }
        if let Some((start, length)) = self.user {
            let domain = UserPeripheralDomain::new(start, length)
                .expect("fixture user domain length is non-zero")
                .with_peripheral(Peripheral::new("gpio", 0x1000));
            system
                .add_peripheral_domain(domain)
                .expect("user domain is recognised");
        }
        system
    }
}
