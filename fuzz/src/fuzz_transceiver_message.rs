use honggfuzz::fuzz;
use ntt_messages::{
    codec::{decode_exact, encode},
    ntt::NativeTokenTransfer,
    transceiver::TransceiverMessage,
    transceivers::wormhole::WormholeTransceiver,
};

fn main() {
    loop {
        fuzz!(|data: &[u8]| {
            let Ok(message) =
                decode_exact::<TransceiverMessage<WormholeTransceiver, NativeTokenTransfer>>(data)
            else {
                return;
            };
            // anything that decodes encodes back to the same bytes
            let encoded = encode(&message).unwrap();
            assert_eq!(encoded, data);
        });
    }
}
