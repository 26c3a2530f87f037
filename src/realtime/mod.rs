mod socket_io_channel;

pub use socket_io_channel::SocketIoChannel;
