use rand::Rng;

const PREFIX: &str = "SV-";
const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
const CODE_LEN: usize = 6;

/// Booking reference such as `SV-7K2QXA`.
pub fn generate_booking_ref<R: Rng + ?Sized>(rng: &mut R) -> String {
    let code: String = (0..CODE_LEN)
        .map(|_| CHARSET[rng.gen_range(0..CHARSET.len())] as char)
        .collect();
    format!("{}{}", PREFIX, code)
}

pub fn is_booking_ref(raw: &str) -> bool {
    raw.strip_prefix(PREFIX).is_some_and(|code| {
        code.len() == CODE_LEN && code.bytes().all(|b| CHARSET.contains(&b))
    })
}
