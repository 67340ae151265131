// auto-implement the wire-order traits for DNS code enums (16-bit on the wire)
#[macro_export]
macro_rules! derive_enum {
    ($t:ty) => {
        impl ToNetworkOrder for $t {
            fn to_network_bytes(&self, buffer: &mut Vec<u8>) -> DNSResult<usize> {
                buffer.write_u16::<BigEndian>(self.code())?;
                Ok(2)
            }
        }

        impl<'a> FromNetworkOrder<'a> for $t {
            fn from_network_bytes(&mut self, buffer: &mut std::io::Cursor<&'a [u8]>) -> DNSResult<()> {
                let value = buffer.read_u16::<BigEndian>()?;
                *self = <$t>::from(value);
                Ok(())
            }
        }
    };
}

// format a buffer for the debug log: "X" as hex bytes, "C" as printable chars
#[macro_export]
macro_rules! format_buffer {
    ("X", $buffer:expr) => {
        $buffer
            .iter()
            .map(|x| format!("{:02X}", x))
            .collect::<Vec<_>>()
            .join(" ")
    };

    ("C", $buffer:expr) => {
        $buffer
            .iter()
            .map(|x| {
                if x.is_ascii_graphic() {
                    (*x as char).to_string()
                } else {
                    String::from(".")
                }
            })
            .collect::<String>()
    };
}

// useful helpers for tests
#[macro_export]
macro_rules! test_from_network {
    ($slice:ident, $t:ty) => {{
        let s = crate::util::get_sample_slice($slice);
        let mut buffer = std::io::Cursor::new(s.as_slice());
        let mut v = <$t>::default();
        assert!(v.from_network_bytes(&mut buffer).is_ok());
        v
    }};
}

#[macro_export]
macro_rules! test_to_network {
    ($data:ident) => {{
        let mut buffer: Vec<u8> = Vec::new();
        let bytes_written = $data.to_network_bytes(&mut buffer).unwrap();

        (buffer, bytes_written)
    }};
}
