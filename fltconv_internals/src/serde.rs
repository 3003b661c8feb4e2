use core::fmt;

use serde::{
    de,
    de::{MapAccess, SeqAccess, Visitor},
    ser,
    ser::{SerializeStruct, SerializeTuple},
    Deserialize, Deserializer, Serialize, Serializer,
};

use crate::WideUint;

/// Writes the significant hexadecimal digits of `x` into the end of `buf` and
/// returns the start index. Zero is written as a single "0".
fn hex_digits(x: u128, buf: &mut [u8; 32]) -> usize {
    let mut i = buf.len();
    let mut x = x;
    loop {
        i -= 1;
        let nibble = (x & 0xf) as u8;
        buf[i] = if nibble < 10 {
            b'0' + nibble
        } else {
            b'a' + (nibble - 10)
        };
        x >>= 4;
        if x == 0 {
            break
        }
    }
    i
}

/// A `serde_support` impl
impl Serialize for WideUint {
    /// Serializes `self` in a platform independent way. In human readable form,
    /// it serializes into a struct named "WideUint" with the single field
    /// "bits", an unsigned hexadecimal string without leading zeros. Otherwise
    /// it serializes into a tuple of the `high` and `low` words.
    ///
    /// ```
    /// // Example using the `ron` crate. Note that it
    /// // omits the struct name which would be "WideUint".
    /// use fltconv::WideUint;
    /// use ron::to_string;
    ///
    /// let x = WideUint::new(0xfedc, 0xba9876543210);
    /// assert_eq!(
    ///     to_string(&x).unwrap(),
    ///     "(bits:\"fedc0000ba9876543210\")"
    /// );
    /// ```
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if serializer.is_human_readable() {
            // this is all done without allocation on our side
            let mut buf = [0u8; 32];
            let start = hex_digits(self.to_u128(), &mut buf);
            let str_buf =
                core::str::from_utf8(&buf[start..]).map_err(<S::Error as ser::Error>::custom)?;
            let mut s = serializer.serialize_struct("WideUint", 1)?;
            s.serialize_field("bits", str_buf)?;
            s.end()
        } else {
            let mut s = serializer.serialize_tuple(2)?;
            s.serialize_element(&self.high)?;
            s.serialize_element(&self.low)?;
            s.end()
        }
    }
}

const FIELDS: &[&str] = &["bits"];

/// Helper for the deserialization impl
enum Field {
    Bits,
}

impl<'de> Deserialize<'de> for Field {
    fn deserialize<D>(deserializer: D) -> Result<Field, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct FieldVisitor;

        impl<'de> Visitor<'de> for FieldVisitor {
            type Value = Field;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("`bits`")
            }

            fn visit_str<E>(self, value: &str) -> Result<Field, E>
            where
                E: de::Error,
            {
                match value {
                    "bits" => Ok(Field::Bits),
                    _ => Err(de::Error::unknown_field(value, FIELDS)),
                }
            }
        }

        deserializer.deserialize_identifier(FieldVisitor)
    }
}

struct WideUintVisitor;

impl<'de> Visitor<'de> for WideUintVisitor {
    type Value = WideUint;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str(
            "struct WideUint consisting of a hexadecimal unsigned integer \"bits\", or a tuple of \
             the high and low words",
        )
    }

    fn visit_map<V>(self, mut map: V) -> Result<WideUint, V::Error>
    where
        V: MapAccess<'de>,
    {
        let mut bits: Option<&str> = None;
        while let Some(key) = map.next_key()? {
            match key {
                Field::Bits => {
                    if bits.is_some() {
                        return Err(de::Error::duplicate_field("bits"))
                    }
                    bits = Some(map.next_value()?);
                }
            }
        }
        let bits = bits.ok_or_else(|| de::Error::missing_field("bits"))?;
        match u128::from_str_radix(bits, 16) {
            Ok(x) => Ok(WideUint::from_u128(x)),
            Err(e) => Err(de::Error::custom(e)),
        }
    }

    fn visit_seq<V>(self, mut seq: V) -> Result<WideUint, V::Error>
    where
        V: SeqAccess<'de>,
    {
        let high: u64 = seq
            .next_element()?
            .ok_or_else(|| de::Error::invalid_length(0, &self))?;
        let low: u64 = seq
            .next_element()?
            .ok_or_else(|| de::Error::invalid_length(1, &self))?;
        Ok(WideUint::new(high, low))
    }
}

/// A `serde_support` impl
impl<'de> Deserialize<'de> for WideUint {
    /// Deserializes `self` in a platform independent way.
    ///
    /// ```
    /// // Example using the `ron` crate. Note that it
    /// // omits the struct name which would be "WideUint".
    /// use fltconv::WideUint;
    /// use ron::from_str;
    ///
    /// let x: WideUint = from_str("(bits:\"fedc0000ba9876543210\")").unwrap();
    /// assert_eq!(x, WideUint::new(0xfedc, 0xba9876543210));
    /// ```
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        if deserializer.is_human_readable() {
            deserializer.deserialize_struct("WideUint", FIELDS, WideUintVisitor)
        } else {
            deserializer.deserialize_tuple(2, WideUintVisitor)
        }
    }
}
