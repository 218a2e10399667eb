// Apache APR1-MD5 crypt ($apr1$), as produced by htpasswd and
// openssl passwd -apr1.

use md5::{Digest, Md5};

const MAGIC: &str = "$apr1$";
const CRYPT64: &[u8; 64] = b"./0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Whether `password` reproduces the `$apr1$salt$digest` string `hash`.
pub fn verify(hash: &str, password: &str) -> bool {
    let rest = match hash.strip_prefix(MAGIC) {
        Some(rest) => rest,
        None => return false,
    };
    let salt = match rest.split_once('$') {
        Some((salt, _)) => salt,
        None => return false,
    };
    compute(password, salt) == hash
}

/// Recomputes the full `$apr1$salt$digest` string for `password` and `salt`.
fn compute(password: &str, salt: &str) -> String {
    let pw = password.as_bytes();
    let salt_bytes = salt.as_bytes();

    let mut ctx = Md5::new();
    ctx.update(pw);
    ctx.update(MAGIC.as_bytes());
    ctx.update(salt_bytes);

    let mut alt = Md5::new();
    alt.update(pw);
    alt.update(salt_bytes);
    alt.update(pw);
    let alt_sum = alt.finalize();

    let mut remaining = pw.len();
    while remaining > 0 {
        let take = remaining.min(16);
        ctx.update(&alt_sum[..take]);
        remaining -= take;
    }

    // One bit of the password length per iteration, null byte for a set bit.
    let mut bits = pw.len();
    while bits > 0 {
        if bits & 1 != 0 {
            ctx.update([0u8]);
        } else {
            ctx.update(&pw[..1]);
        }
        bits >>= 1;
    }
    let mut sum = ctx.finalize();

    // The thousand-round stretching loop of the original algorithm.
    for round in 0..1000 {
        let mut c = Md5::new();
        if round & 1 != 0 {
            c.update(pw);
        } else {
            c.update(&sum[..]);
        }
        if round % 3 != 0 {
            c.update(salt_bytes);
        }
        if round % 7 != 0 {
            c.update(pw);
        }
        if round & 1 != 0 {
            c.update(&sum[..]);
        } else {
            c.update(pw);
        }
        sum = c.finalize();
    }

    // Digest bytes are emitted in the algorithm's fixed permutation order.
    let mut digest = String::with_capacity(22);
    for &(a, b, c) in &[(0, 6, 12), (1, 7, 13), (2, 8, 14), (3, 9, 15), (4, 10, 5)] {
        let v = (u32::from(sum[a]) << 16) | (u32::from(sum[b]) << 8) | u32::from(sum[c]);
        to64(&mut digest, v, 4);
    }
    to64(&mut digest, u32::from(sum[11]), 2);

    format!("{}{}${}", MAGIC, salt, digest)
}

fn to64(out: &mut String, mut v: u32, chars: usize) {
    for _ in 0..chars {
        out.push(CRYPT64[(v & 0x3f) as usize] as char);
        v >>= 6;
    }
}
