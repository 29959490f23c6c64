//! Throwable types of the Java platform.
//!
//! Platform classes live in the JDK's module image rather than on a project
//! classpath, so the class-path introspector answers lookups for the common
//! exception and error types from this catalog.

use std::collections::HashSet;
use std::sync::LazyLock;

const JDK_THROWABLES: &[&str] = &[
    // java.lang
    "java.lang.ArithmeticException",
    "java.lang.ArrayIndexOutOfBoundsException",
    "java.lang.ArrayStoreException",
    "java.lang.AssertionError",
    "java.lang.ClassCastException",
    "java.lang.ClassNotFoundException",
    "java.lang.CloneNotSupportedException",
    "java.lang.EnumConstantNotPresentException",
    "java.lang.Error",
    "java.lang.Exception",
    "java.lang.IllegalAccessException",
    "java.lang.IllegalArgumentException",
    "java.lang.IllegalCallerException",
    "java.lang.IllegalMonitorStateException",
    "java.lang.IllegalStateException",
    "java.lang.IndexOutOfBoundsException",
    "java.lang.InstantiationException",
    "java.lang.InterruptedException",
    "java.lang.LinkageError",
    "java.lang.NegativeArraySizeException",
    "java.lang.NoSuchFieldException",
    "java.lang.NoSuchMethodException",
    "java.lang.NullPointerException",
    "java.lang.NumberFormatException",
    "java.lang.OutOfMemoryError",
    "java.lang.ReflectiveOperationException",
    "java.lang.RuntimeException",
    "java.lang.SecurityException",
    "java.lang.StackOverflowError",
    "java.lang.StringIndexOutOfBoundsException",
    "java.lang.Throwable",
    "java.lang.TypeNotPresentException",
    "java.lang.UnsupportedOperationException",
    "java.lang.VirtualMachineError",
    // java.io
    "java.io.CharConversionException",
    "java.io.EOFException",
    "java.io.FileNotFoundException",
    "java.io.IOException",
    "java.io.InterruptedIOException",
    "java.io.InvalidObjectException",
    "java.io.NotSerializableException",
    "java.io.ObjectStreamException",
    "java.io.UncheckedIOException",
    "java.io.UnsupportedEncodingException",
    "java.io.UTFDataFormatException",
    // java.nio
    "java.nio.BufferOverflowException",
    "java.nio.BufferUnderflowException",
    "java.nio.ReadOnlyBufferException",
    "java.nio.charset.CharacterCodingException",
    "java.nio.file.NoSuchFileException",
    // java.util
    "java.util.ConcurrentModificationException",
    "java.util.EmptyStackException",
    "java.util.IllegalFormatException",
    "java.util.InputMismatchException",
    "java.util.MissingResourceException",
    "java.util.NoSuchElementException",
    "java.util.concurrent.CancellationException",
    "java.util.concurrent.CompletionException",
    "java.util.concurrent.ExecutionException",
    "java.util.concurrent.RejectedExecutionException",
    "java.util.concurrent.TimeoutException",
    // java.text, java.net, java.time
    "java.text.ParseException",
    "java.net.MalformedURLException",
    "java.net.URISyntaxException",
    "java.net.UnknownHostException",
    "java.time.DateTimeException",
    "java.time.format.DateTimeParseException",
];

static CATALOG: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| JDK_THROWABLES.iter().copied().collect());

/// Whether `qualified_name` is a known platform exception or error type.
pub fn is_jdk_throwable(qualified_name: &str) -> bool {
    CATALOG.contains(qualified_name)
}
