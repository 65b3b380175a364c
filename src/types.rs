pub type Year = u16;
